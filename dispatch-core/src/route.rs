//! Chosen delivery routes.
//!
//! Aggregates ordered stops with their total time and timeline.

use crate::{RouteTiming, Stop, TimelineEvent};

/// An ordered route through every pickup and delivery, with its timing.
///
/// # Examples
/// ```
/// use dispatch_core::{PlannedRoute, RouteTiming, Stop};
/// use dispatch_core::{Consumer, ConsumerId, Location, Restaurant, RestaurantId};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let restaurant = Restaurant::new(RestaurantId(1), Location::new("R1", 12.94, 77.62)?, 10.0)?;
/// let consumer = Consumer::new(ConsumerId(1), Location::new("C1", 12.95, 77.63)?, RestaurantId(1));
/// let timing = RouteTiming { total_minutes: 14.2, events: Vec::new() };
/// let route = PlannedRoute::new(vec![Stop::from(restaurant), Stop::from(consumer)], timing);
/// assert_eq!(route.path(), "R1 -> C1");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedRoute {
    /// Stops in visiting order, excluding the agent's start.
    pub stops: Vec<Stop>,
    /// Elapsed minutes when the last delivery is made.
    pub total_minutes: f64,
    /// Arrival, wait and delivery events in visiting order.
    pub events: Vec<TimelineEvent>,
}

impl PlannedRoute {
    /// Pair a stop sequence with its simulated timing.
    pub fn new(stops: Vec<Stop>, timing: RouteTiming) -> Self {
        Self {
            stops,
            total_minutes: timing.total_minutes,
            events: timing.events,
        }
    }

    /// Stop names joined with arrows, e.g. `R1 -> R2 -> C2 -> C1`.
    pub fn path(&self) -> String {
        self.stops
            .iter()
            .map(Stop::name)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{consumer, restaurant};

    #[test]
    fn route_preserves_order() {
        let stops = vec![
            Stop::from(restaurant(2, 0.0, 0.0, 1.0)),
            Stop::from(restaurant(1, 0.0, 0.0, 1.0)),
            Stop::from(consumer(1, 0.0, 0.0, 1)),
            Stop::from(consumer(2, 0.0, 0.0, 2)),
        ];
        let route = PlannedRoute::new(
            stops.clone(),
            RouteTiming {
                total_minutes: 4.0,
                events: Vec::new(),
            },
        );
        assert_eq!(route.stops, stops);
        assert_eq!(route.path(), "R2 -> R1 -> C1 -> C2");
    }

    #[test]
    fn empty_route_has_empty_path() {
        let route = PlannedRoute::new(
            Vec::new(),
            RouteTiming {
                total_minutes: 0.0,
                events: Vec::new(),
            },
        );
        assert!(route.path().is_empty());
    }
}
