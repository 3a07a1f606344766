//! Builders for compact delivery fixtures used by unit and behaviour tests.
//!
//! Restaurants are named `R{id}` and consumers `C{id}`, matching the labels
//! the request layer assigns by default. Invalid fixture input panics.

use crate::{Consumer, ConsumerId, DeliveryProblem, Location, Restaurant, RestaurantId};

/// Build a [`Location`] from latitude and longitude.
///
/// # Panics
/// Panics when the coordinates are out of range.
#[must_use]
pub fn location(name: &str, latitude: f64, longitude: f64) -> Location {
    Location::new(name, latitude, longitude).expect("fixture coordinates must be valid")
}

/// Build restaurant `R{id}`.
///
/// # Panics
/// Panics when the coordinates or the preparation time are invalid.
#[must_use]
pub fn restaurant(id: u32, latitude: f64, longitude: f64, prep_time_minutes: f64) -> Restaurant {
    Restaurant::new(
        RestaurantId(id),
        location(&format!("R{id}"), latitude, longitude),
        prep_time_minutes,
    )
    .expect("fixture preparation time must be positive")
}

/// Build consumer `C{id}` served by restaurant `restaurant_id`.
///
/// # Panics
/// Panics when the coordinates are out of range.
#[must_use]
pub fn consumer(id: u32, latitude: f64, longitude: f64, restaurant_id: u32) -> Consumer {
    Consumer::new(
        ConsumerId(id),
        location(&format!("C{id}"), latitude, longitude),
        RestaurantId(restaurant_id),
    )
}

/// Build a problem from an agent position and `(restaurant, consumer)` pairs.
///
/// # Panics
/// Panics when the pairs reference each other inconsistently.
#[must_use]
pub fn problem(agent: Location, orders: Vec<(Restaurant, Consumer)>) -> DeliveryProblem {
    let (restaurants, consumers) = orders.into_iter().unzip();
    DeliveryProblem::new(agent, restaurants, consumers).expect("fixture orders must be consistent")
}

/// One order where agent, restaurant and consumer share a position.
///
/// The only cost is the ten-minute preparation delay.
#[must_use]
pub fn co_located_order() -> DeliveryProblem {
    problem(
        location("Delivery Agent", 12.9279, 77.6271),
        vec![(
            restaurant(1, 12.9279, 77.6271, 10.0),
            consumer(1, 12.9279, 77.6271, 1),
        )],
    )
}

/// `count` orders spread along a line north of the origin.
///
/// Restaurant `n` sits `n` hundredths of a degree north; its consumer sits
/// the same distance east. Every order takes five minutes to prepare.
#[must_use]
pub fn orders_along_meridian(count: u32) -> DeliveryProblem {
    let orders = (1..=count)
        .map(|id| {
            let offset = f64::from(id) / 100.0;
            (restaurant(id, offset, 0.0, 5.0), consumer(id, 0.0, offset, id))
        })
        .collect();
    problem(location("Delivery Agent", 0.0, 0.0), orders)
}
