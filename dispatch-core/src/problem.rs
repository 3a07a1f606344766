//! A validated set of orders for one optimisation run.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Consumer, ConsumerId, Location, Restaurant, RestaurantId, Stop};

/// Errors returned by [`DeliveryProblem::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// Two restaurants share an identifier.
    #[error("{0} appears more than once")]
    DuplicateRestaurant(RestaurantId),
    /// Two consumers share an identifier.
    #[error("{0} appears more than once")]
    DuplicateConsumer(ConsumerId),
    /// A consumer refers to a restaurant missing from the problem.
    #[error("{consumer} refers to unknown {restaurant}")]
    UnknownRestaurant {
        /// The consumer holding the dangling reference.
        consumer: ConsumerId,
        /// The restaurant that could not be found.
        restaurant: RestaurantId,
    },
    /// A restaurant has no consumer to deliver to.
    #[error("{0} has no consumer")]
    UnpairedRestaurant(RestaurantId),
    /// A second consumer was assigned to an already served restaurant.
    #[error("{consumer} shares {restaurant} with another consumer")]
    SharedRestaurant {
        /// The consumer that repeated the reference.
        consumer: ConsumerId,
        /// The restaurant referred to more than once.
        restaurant: RestaurantId,
    },
}

/// The agent's start position plus every restaurant and consumer to route.
///
/// Every restaurant is paired with exactly one consumer, so a problem with
/// `n` orders always has `2n` stops. Stops are held in a fixed order, all
/// restaurants followed by all consumers, which is the order searches permute
/// from.
///
/// # Examples
/// ```
/// use dispatch_core::{Consumer, ConsumerId, DeliveryProblem, Location, Restaurant, RestaurantId};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let agent = Location::new("Delivery Agent", 12.93, 77.62)?;
/// let restaurant = Restaurant::new(RestaurantId(1), Location::new("R1", 12.94, 77.62)?, 10.0)?;
/// let consumer = Consumer::new(ConsumerId(1), Location::new("C1", 12.95, 77.63)?, RestaurantId(1));
/// let problem = DeliveryProblem::new(agent, vec![restaurant], vec![consumer])?;
/// assert_eq!(problem.order_count(), 1);
/// assert_eq!(problem.stops().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryProblem {
    agent: Location,
    stops: Vec<Stop>,
    restaurant_count: usize,
}

impl DeliveryProblem {
    /// Validates identifiers and the one-to-one pairing of consumers with
    /// restaurants, then builds the problem.
    pub fn new(
        agent: Location,
        restaurants: Vec<Restaurant>,
        consumers: Vec<Consumer>,
    ) -> Result<Self, ProblemError> {
        let mut restaurant_ids = HashSet::with_capacity(restaurants.len());
        for restaurant in &restaurants {
            if !restaurant_ids.insert(restaurant.id) {
                return Err(ProblemError::DuplicateRestaurant(restaurant.id));
            }
        }

        let mut consumer_ids = HashSet::with_capacity(consumers.len());
        let mut served = HashSet::with_capacity(consumers.len());
        for consumer in &consumers {
            if !consumer_ids.insert(consumer.id) {
                return Err(ProblemError::DuplicateConsumer(consumer.id));
            }
            if !restaurant_ids.contains(&consumer.restaurant) {
                return Err(ProblemError::UnknownRestaurant {
                    consumer: consumer.id,
                    restaurant: consumer.restaurant,
                });
            }
            if !served.insert(consumer.restaurant) {
                return Err(ProblemError::SharedRestaurant {
                    consumer: consumer.id,
                    restaurant: consumer.restaurant,
                });
            }
        }
        if let Some(unpaired) = restaurants
            .iter()
            .find(|restaurant| !served.contains(&restaurant.id))
        {
            return Err(ProblemError::UnpairedRestaurant(unpaired.id));
        }

        let restaurant_count = restaurants.len();
        let stops = restaurants
            .into_iter()
            .map(Stop::Restaurant)
            .chain(consumers.into_iter().map(Stop::Consumer))
            .collect();
        Ok(Self {
            agent,
            stops,
            restaurant_count,
        })
    }

    /// Where the agent starts.
    pub const fn agent(&self) -> &Location {
        &self.agent
    }

    /// All stops to visit: restaurants first, then consumers.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Restaurants in input order.
    pub fn restaurants(&self) -> impl Iterator<Item = &Restaurant> {
        self.stops.iter().filter_map(|stop| match stop {
            Stop::Restaurant(restaurant) => Some(restaurant),
            Stop::Agent(_) | Stop::Consumer(_) => None,
        })
    }

    /// Consumers in input order.
    pub fn consumers(&self) -> impl Iterator<Item = &Consumer> {
        self.stops.iter().filter_map(|stop| match stop {
            Stop::Consumer(consumer) => Some(consumer),
            Stop::Agent(_) | Stop::Restaurant(_) => None,
        })
    }

    /// Number of restaurants.
    pub const fn restaurant_count(&self) -> usize {
        self.restaurant_count
    }

    /// Number of orders; half the number of stops.
    pub fn order_count(&self) -> usize {
        self.stops.len() - self.restaurant_count
    }

    /// Position of `id` among [`Self::restaurants`].
    pub fn restaurant_slot(&self, id: RestaurantId) -> Option<usize> {
        self.restaurants().position(|restaurant| restaurant.id == id)
    }

    /// Position of `id` among [`Self::consumers`].
    pub fn consumer_slot(&self, id: ConsumerId) -> Option<usize> {
        self.consumers().position(|consumer| consumer.id == id)
    }
}
