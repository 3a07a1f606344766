//! Great-circle distances and travel times.
//!
//! Distances come from the Haversine formula on a spherical Earth; travel
//! times assume a constant average speed. A [`Speed`] can only be built from a
//! strictly positive value, so converting a distance into minutes never
//! divides by zero or a negative number.

use geo::Coord;
use thiserror::Error;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average agent speed used when none is configured.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Haversine great-circle distance in kilometres between two WGS84 points.
///
/// The result is non-negative, symmetric, and exactly zero for identical
/// points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dispatch_core::haversine_km;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let one_degree_north = Coord { x: 0.0, y: 1.0 };
/// let distance = haversine_km(origin, one_degree_north);
/// assert!((distance - 111.19).abs() < 0.01);
/// assert_eq!(haversine_km(origin, origin), 0.0);
/// ```
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lon1 = a.x.to_radians();
    let lat2 = b.y.to_radians();
    let lon2 = b.x.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Errors raised while building search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Average speed was zero, negative or not finite.
    #[error("average speed must be a positive number of km/h, got {0}")]
    NonPositiveSpeed(f64),
}

/// A validated, strictly positive average speed.
///
/// # Examples
/// ```
/// use dispatch_core::Speed;
///
/// # fn main() -> Result<(), dispatch_core::ConfigError> {
/// let speed = Speed::from_kmh(60.0)?;
/// assert_eq!(speed.travel_minutes(15.0), 15.0);
/// assert!(Speed::from_kmh(0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    kmh: f64,
}

impl Speed {
    /// Validate `kmh` and wrap it.
    pub fn from_kmh(kmh: f64) -> Result<Self, ConfigError> {
        if kmh.is_finite() && kmh > 0.0 {
            Ok(Self { kmh })
        } else {
            Err(ConfigError::NonPositiveSpeed(kmh))
        }
    }

    /// Speed in kilometres per hour.
    pub const fn kmh(self) -> f64 {
        self.kmh
    }

    /// Minutes needed to cover `distance_km` at this speed.
    pub fn travel_minutes(self, distance_km: f64) -> f64 {
        distance_km / self.kmh * 60.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self {
            kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl TryFrom<f64> for Speed {
    type Error = ConfigError;

    fn try_from(kmh: f64) -> Result<Self, Self::Error> {
        Self::from_kmh(kmh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn coord() -> impl Strategy<Value = Coord<f64>> {
        (-90.0_f64..=90.0, -180.0_f64..=180.0).prop_map(|(y, x)| Coord { x, y })
    }

    #[rstest]
    fn known_distance_between_cities() {
        // Bengaluru to Chennai is roughly 290 km as the crow flies.
        let bengaluru = Coord { x: 77.5946, y: 12.9716 };
        let chennai = Coord { x: 80.2707, y: 13.0827 };
        let distance = haversine_km(bengaluru, chennai);
        assert!((distance - 290.2).abs() < 1.0, "got {distance}");
    }

    #[rstest]
    fn antipodes_are_half_the_circumference() {
        let distance = haversine_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 180.0, y: 0.0 });
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-30.0)]
    #[case(f64::NAN)]
    #[case(f64::NEG_INFINITY)]
    #[case(f64::INFINITY)]
    fn speed_rejects_non_positive_values(#[case] kmh: f64) {
        let err = Speed::from_kmh(kmh).expect_err("speed must be positive");
        assert!(matches!(err, ConfigError::NonPositiveSpeed(_)));
    }

    #[rstest]
    fn default_speed_matches_constant() {
        assert_eq!(Speed::default().kmh(), DEFAULT_SPEED_KMH);
        assert_eq!(Speed::try_from(12.5).map(Speed::kmh), Ok(12.5));
    }

    #[rstest]
    #[case(30.0, 10.0, 20.0)]
    #[case(60.0, 1.0, 1.0)]
    #[case(45.0, 0.0, 0.0)]
    fn travel_minutes_scales_distance(
        #[case] kmh: f64,
        #[case] distance_km: f64,
        #[case] expected: f64,
    ) {
        let speed = Speed::from_kmh(kmh).expect("valid speed");
        assert!((speed.travel_minutes(distance_km) - expected).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn distance_to_self_is_zero(point in coord()) {
            prop_assert_eq!(haversine_km(point, point), 0.0);
        }

        #[test]
        fn distance_is_symmetric(a in coord(), b in coord()) {
            prop_assert_eq!(haversine_km(a, b), haversine_km(b, a));
        }

        #[test]
        fn distance_is_non_negative(a in coord(), b in coord()) {
            let distance = haversine_km(a, b);
            prop_assert!(distance >= 0.0 && distance.is_finite());
        }

        #[test]
        fn travel_time_is_linear(distance in 0.0_f64..20_000.0, kmh in 0.1_f64..500.0) {
            let speed = Speed::from_kmh(kmh).expect("strategy yields positive speeds");
            prop_assert_eq!(speed.travel_minutes(2.0 * distance), 2.0 * speed.travel_minutes(distance));
        }
    }
}
