//! Restaurants, consumers and the stops a route can visit.

use std::fmt;

use thiserror::Error;

use crate::Location;

/// Identifier of a restaurant within one [`DeliveryProblem`](crate::DeliveryProblem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestaurantId(pub u32);

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "restaurant #{}", self.0)
    }
}

/// Identifier of a consumer within one [`DeliveryProblem`](crate::DeliveryProblem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumerId(pub u32);

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "consumer #{}", self.0)
    }
}

/// A pickup point with a preparation delay.
///
/// The agent cannot leave with the order before `prep_time_minutes` have
/// elapsed since the route started.
///
/// # Examples
/// ```
/// use dispatch_core::{Location, Restaurant, RestaurantId};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let location = Location::new("R1", 12.93, 77.62)?;
/// let restaurant = Restaurant::new(RestaurantId(1), location, 15.0)?;
/// assert_eq!(restaurant.prep_time_minutes(), 15.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RestaurantFields"))]
pub struct Restaurant {
    /// Unique identifier within the problem.
    pub id: RestaurantId,
    /// Where the order is collected.
    pub location: Location,
    prep_time_minutes: f64,
}

/// Errors returned by [`Restaurant::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RestaurantError {
    /// Preparation time was zero, negative or not finite.
    #[error("preparation time must be positive, got {0} minutes")]
    NonPositivePrepTime(f64),
}

impl Restaurant {
    /// Validates and constructs a [`Restaurant`].
    pub fn new(
        id: RestaurantId,
        location: Location,
        prep_time_minutes: f64,
    ) -> Result<Self, RestaurantError> {
        if !(prep_time_minutes.is_finite() && prep_time_minutes > 0.0) {
            return Err(RestaurantError::NonPositivePrepTime(prep_time_minutes));
        }
        Ok(Self {
            id,
            location,
            prep_time_minutes,
        })
    }

    /// Minutes from the start of the route until the order is ready.
    pub const fn prep_time_minutes(&self) -> f64 {
        self.prep_time_minutes
    }
}

/// Serialised form of a [`Restaurant`], checked by [`Restaurant::new`] on
/// decode.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RestaurantFields {
    id: RestaurantId,
    location: Location,
    prep_time_minutes: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RestaurantFields> for Restaurant {
    type Error = RestaurantError;

    fn try_from(fields: RestaurantFields) -> Result<Self, Self::Error> {
        Self::new(fields.id, fields.location, fields.prep_time_minutes)
    }
}

/// A drop-off point for the order of exactly one restaurant.
///
/// `restaurant` refers to a [`Restaurant`] owned by the same
/// [`DeliveryProblem`](crate::DeliveryProblem); it is resolved by identifier
/// when a route is simulated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consumer {
    /// Unique identifier within the problem.
    pub id: ConsumerId,
    /// Where the order is delivered.
    pub location: Location,
    /// Source of the consumer's order.
    pub restaurant: RestaurantId,
}

impl Consumer {
    /// Construct a consumer served by `restaurant`.
    pub const fn new(id: ConsumerId, location: Location, restaurant: RestaurantId) -> Self {
        Self {
            id,
            location,
            restaurant,
        }
    }
}

/// Any point a route starts from or visits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Stop {
    /// The agent's starting position. Never a pickup or delivery target.
    Agent(Location),
    /// An order pickup.
    Restaurant(Restaurant),
    /// An order delivery.
    Consumer(Consumer),
}

impl Stop {
    /// Geographic location of the stop.
    pub const fn location(&self) -> &Location {
        match self {
            Self::Agent(location) => location,
            Self::Restaurant(restaurant) => &restaurant.location,
            Self::Consumer(consumer) => &consumer.location,
        }
    }

    /// Display name of the stop.
    pub fn name(&self) -> &str {
        &self.location().name
    }
}

impl From<Restaurant> for Stop {
    fn from(restaurant: Restaurant) -> Self {
        Self::Restaurant(restaurant)
    }
}

impl From<Consumer> for Stop {
    fn from(consumer: Consumer) -> Self {
        Self::Consumer(consumer)
    }
}
