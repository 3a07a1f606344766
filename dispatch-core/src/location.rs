//! Named geographic points.

use geo::Coord;
use thiserror::Error;

/// A named WGS84 coordinate.
///
/// Coordinates follow the `geo` convention: `x = longitude`, `y = latitude`.
///
/// # Examples
/// ```
/// use dispatch_core::Location;
///
/// # fn main() -> Result<(), dispatch_core::LocationError> {
/// let koramangala = Location::new("Koramangala", 12.9279, 77.6271)?;
/// assert_eq!(koramangala.latitude(), 12.9279);
/// assert_eq!(koramangala.longitude(), 77.6271);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LocationFields"))]
pub struct Location {
    /// Human-readable label used in timelines and reports.
    pub name: String,
    /// Geospatial position.
    pub coord: Coord<f64>,
}

/// Errors returned by [`Location::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LocationError {
    /// Latitude was outside `[-90, 90]` or not a number.
    #[error("latitude {0} must be within [-90, 90]")]
    InvalidLatitude(f64),
    /// Longitude was outside `[-180, 180]` or not a number.
    #[error("longitude {0} must be within [-180, 180]")]
    InvalidLongitude(f64),
}

impl Location {
    /// Validates and constructs a [`Location`] from latitude and longitude in
    /// degrees.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::InvalidLongitude(longitude));
        }
        Ok(Self {
            name: name.into(),
            coord: Coord {
                x: longitude,
                y: latitude,
            },
        })
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.coord.y
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.coord.x
    }
}

/// Serialised form of a [`Location`], checked by [`Location::new`] on decode.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct LocationFields {
    name: String,
    coord: Coord<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<LocationFields> for Location {
    type Error = LocationError;

    fn try_from(fields: LocationFields) -> Result<Self, Self::Error> {
        Self::new(fields.name, fields.coord.y, fields.coord.x)
    }
}
