//! Replay a candidate stop sequence and time it.
//!
//! [`TimingSimulator::evaluate`] walks the sequence from the agent's start
//! position, adding travel time for every leg and waiting at restaurants until
//! the order is ready. A delivery whose restaurant has not been visited yet
//! makes the whole route infeasible, as does a consumer that never appears in
//! the sequence.
//!
//! Infeasibility is an ordinary outcome rather than an error: searches
//! evaluate many orderings that break pickup-before-delivery and simply
//! discard them. [`RouteEvaluation::total_minutes`] reports such routes as
//! infinitely long with an empty timeline.

use std::fmt;

use geo::Coord;

use crate::{
    Consumer, ConsumerId, DeliveryProblem, Restaurant, RestaurantId, Speed, Stop, haversine_km,
};

/// One entry of a route timeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum TimelineEvent {
    /// The agent reached a restaurant and left once the order was ready.
    Arrived {
        /// Restaurant name.
        stop: String,
        /// Elapsed minutes when the order was collected.
        at_minutes: f64,
        /// Minutes spent waiting for preparation to finish.
        waited_minutes: f64,
    },
    /// The agent handed an order to a consumer.
    Delivered {
        /// Consumer name.
        stop: String,
        /// Elapsed minutes at delivery.
        at_minutes: f64,
    },
}

impl fmt::Display for TimelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrived {
                stop,
                at_minutes,
                waited_minutes,
            } => write!(
                f,
                "Arrived at {stop} at {at_minutes:.1} min, waited {waited_minutes:.1} min"
            ),
            Self::Delivered { stop, at_minutes } => {
                write!(f, "Delivered to {stop} at {at_minutes:.1} min")
            }
        }
    }
}

/// Why a candidate route was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// A consumer was visited before its restaurant.
    DeliveryBeforePickup {
        /// The consumer reached too early.
        consumer: ConsumerId,
        /// The restaurant not yet visited.
        restaurant: RestaurantId,
    },
    /// A consumer refers to a restaurant outside the problem.
    UnknownRestaurant {
        /// The consumer holding the reference.
        consumer: ConsumerId,
        /// The missing restaurant.
        restaurant: RestaurantId,
    },
    /// A consumer of the problem never appeared in the sequence.
    Undelivered {
        /// The first consumer left without its order.
        consumer: ConsumerId,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeliveryBeforePickup {
                consumer,
                restaurant,
            } => write!(f, "{consumer} visited before {restaurant}"),
            Self::UnknownRestaurant {
                consumer,
                restaurant,
            } => write!(f, "{consumer} refers to unknown {restaurant}"),
            Self::Undelivered { consumer } => write!(f, "{consumer} never receives its order"),
        }
    }
}

/// Timing of a feasible route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTiming {
    /// Elapsed minutes when the last stop is served.
    pub total_minutes: f64,
    /// One event per restaurant or consumer visited, in visiting order.
    pub events: Vec<TimelineEvent>,
}

/// Outcome of replaying one candidate sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEvaluation {
    /// Every delivery followed its pickup and every consumer was served.
    Feasible(RouteTiming),
    /// The sequence broke a precedence or coverage rule.
    Infeasible(Infeasibility),
}

impl RouteEvaluation {
    /// Total minutes, or [`f64::INFINITY`] for an infeasible route.
    pub const fn total_minutes(&self) -> f64 {
        match self {
            Self::Feasible(timing) => timing.total_minutes,
            Self::Infeasible(_) => f64::INFINITY,
        }
    }

    /// Timeline events; empty for an infeasible route.
    pub fn events(&self) -> &[TimelineEvent] {
        match self {
            Self::Feasible(timing) => &timing.events,
            Self::Infeasible(_) => &[],
        }
    }

    /// Whether the route satisfied every rule.
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// The timing of a feasible route.
    pub fn into_timing(self) -> Option<RouteTiming> {
        match self {
            Self::Feasible(timing) => Some(timing),
            Self::Infeasible(_) => None,
        }
    }
}

/// Replays candidate sequences for one [`DeliveryProblem`].
///
/// Each call to [`evaluate`](Self::evaluate) starts from a fresh state, so a
/// simulator can be reused across candidates.
///
/// # Examples
/// ```
/// use dispatch_core::{Consumer, ConsumerId, DeliveryProblem, Location, Restaurant, RestaurantId};
/// use dispatch_core::{Speed, TimingSimulator};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Agent, restaurant and consumer share a spot, so only preparation counts.
/// let spot = |name: &str| Location::new(name, 12.9279, 77.6271);
/// let restaurant = Restaurant::new(RestaurantId(1), spot("R1")?, 10.0)?;
/// let consumer = Consumer::new(ConsumerId(1), spot("C1")?, RestaurantId(1));
/// let problem = DeliveryProblem::new(spot("Delivery Agent")?, vec![restaurant], vec![consumer])?;
///
/// let simulator = TimingSimulator::new(&problem, Speed::default());
/// let evaluation = simulator.evaluate(problem.stops());
/// assert_eq!(evaluation.total_minutes(), 10.0);
/// let lines: Vec<String> = evaluation.events().iter().map(ToString::to_string).collect();
/// assert_eq!(lines.last().map(String::as_str), Some("Delivered to C1 at 10.0 min"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimingSimulator<'a> {
    problem: &'a DeliveryProblem,
    speed: Speed,
}

impl<'a> TimingSimulator<'a> {
    /// Create a simulator travelling at `speed`.
    pub const fn new(problem: &'a DeliveryProblem, speed: Speed) -> Self {
        Self { problem, speed }
    }

    /// The problem candidates are checked against.
    pub const fn problem(&self) -> &'a DeliveryProblem {
        self.problem
    }

    /// Travel speed applied to every leg.
    pub const fn speed(&self) -> Speed {
        self.speed
    }

    /// Time the stops in `sequence`, starting from the agent's position.
    ///
    /// Evaluation stops at the first delivery whose restaurant has not been
    /// picked up; no partial timeline is kept.
    pub fn evaluate<'s, I>(&self, sequence: I) -> RouteEvaluation
    where
        I: IntoIterator<Item = &'s Stop>,
    {
        let mut state = SimulationState::new(self.problem);
        for stop in sequence {
            state.travel_to(stop.location().coord, self.speed);
            match stop {
                Stop::Agent(_) => {}
                Stop::Restaurant(restaurant) => state.pick_up(self.problem, restaurant),
                Stop::Consumer(consumer) => {
                    if let Err(reason) = state.deliver(self.problem, consumer) {
                        return RouteEvaluation::Infeasible(reason);
                    }
                }
            }
        }
        state.finish(self.problem)
    }
}

/// Mutable state of a single replay.
///
/// Pickup times are `None` until the restaurant is visited, so a pickup that
/// completes at minute zero still counts.
struct SimulationState {
    elapsed_minutes: f64,
    position: Coord<f64>,
    pickups: Vec<Option<f64>>,
    delivered: Vec<bool>,
    events: Vec<TimelineEvent>,
}

impl SimulationState {
    fn new(problem: &DeliveryProblem) -> Self {
        Self {
            elapsed_minutes: 0.0,
            position: problem.agent().coord,
            pickups: vec![None; problem.restaurant_count()],
            delivered: vec![false; problem.order_count()],
            events: Vec::with_capacity(problem.stops().len()),
        }
    }

    fn travel_to(&mut self, next: Coord<f64>, speed: Speed) {
        self.elapsed_minutes += speed.travel_minutes(haversine_km(self.position, next));
        self.position = next;
    }

    fn pick_up(&mut self, problem: &DeliveryProblem, restaurant: &Restaurant) {
        let waited_minutes = (restaurant.prep_time_minutes() - self.elapsed_minutes).max(0.0);
        self.elapsed_minutes += waited_minutes;
        if let Some(pickup) = problem
            .restaurant_slot(restaurant.id)
            .and_then(|slot| self.pickups.get_mut(slot))
        {
            *pickup = Some(self.elapsed_minutes);
        }
        self.events.push(TimelineEvent::Arrived {
            stop: restaurant.location.name.clone(),
            at_minutes: self.elapsed_minutes,
            waited_minutes,
        });
    }

    fn deliver(
        &mut self,
        problem: &DeliveryProblem,
        consumer: &Consumer,
    ) -> Result<(), Infeasibility> {
        let slot = problem.restaurant_slot(consumer.restaurant).ok_or(
            Infeasibility::UnknownRestaurant {
                consumer: consumer.id,
                restaurant: consumer.restaurant,
            },
        )?;
        if self.pickups.get(slot).copied().flatten().is_none() {
            return Err(Infeasibility::DeliveryBeforePickup {
                consumer: consumer.id,
                restaurant: consumer.restaurant,
            });
        }
        if let Some(delivered) = problem
            .consumer_slot(consumer.id)
            .and_then(|slot| self.delivered.get_mut(slot))
        {
            *delivered = true;
        }
        self.events.push(TimelineEvent::Delivered {
            stop: consumer.location.name.clone(),
            at_minutes: self.elapsed_minutes,
        });
        Ok(())
    }

    fn finish(self, problem: &DeliveryProblem) -> RouteEvaluation {
        let undelivered = problem
            .consumers()
            .zip(&self.delivered)
            .find(|(_, delivered)| !**delivered);
        if let Some((consumer, _)) = undelivered {
            return RouteEvaluation::Infeasible(Infeasibility::Undelivered {
                consumer: consumer.id,
            });
        }
        RouteEvaluation::Feasible(RouteTiming {
            total_minutes: self.elapsed_minutes,
            events: self.events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{co_located_order, consumer, location, problem, restaurant};
    use rstest::{fixture, rstest};

    #[fixture]
    fn speed() -> Speed {
        Speed::from_kmh(30.0).expect("valid speed")
    }

    /// Agent at the origin, restaurant one hundredth of a degree north and
    /// consumer a further hundredth north. Prep outlasts the first leg.
    #[fixture]
    fn single_order() -> DeliveryProblem {
        problem(
            location("Delivery Agent", 0.0, 0.0),
            vec![(restaurant(1, 0.01, 0.0, 5.0), consumer(1, 0.02, 0.0, 1))],
        )
    }

    fn stops<'p>(problem: &'p DeliveryProblem, names: &[&str]) -> Vec<&'p Stop> {
        names
            .iter()
            .filter_map(|name| problem.stops().iter().find(|stop| stop.name() == *name))
            .collect()
    }

    #[rstest]
    fn co_located_order_waits_for_preparation(speed: Speed) {
        let problem = co_located_order();
        let evaluation = TimingSimulator::new(&problem, speed).evaluate(problem.stops());

        assert!(evaluation.is_feasible());
        assert_eq!(evaluation.total_minutes(), 10.0);
        let lines: Vec<String> = evaluation.events().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "Arrived at R1 at 10.0 min, waited 10.0 min",
                "Delivered to C1 at 10.0 min",
            ]
        );
    }

    #[rstest]
    fn single_order_adds_travel_wait_and_delivery_legs(single_order: DeliveryProblem, speed: Speed) {
        let agent = single_order.agent().coord;
        let r1 = stops(&single_order, &["R1"])[0].location().coord;
        let c1 = stops(&single_order, &["C1"])[0].location().coord;
        let to_restaurant = speed.travel_minutes(haversine_km(agent, r1));
        let wait = (5.0 - to_restaurant).max(0.0);
        let expected = to_restaurant + wait + speed.travel_minutes(haversine_km(r1, c1));

        let evaluation =
            TimingSimulator::new(&single_order, speed).evaluate(single_order.stops());
        assert!((evaluation.total_minutes() - expected).abs() < 1e-9);
        assert!(wait > 0.0, "restaurant leg is shorter than the prep time");
    }

    #[rstest]
    fn delivery_before_pickup_is_infeasible(single_order: DeliveryProblem, speed: Speed) {
        let sequence = stops(&single_order, &["C1", "R1"]);
        let evaluation = TimingSimulator::new(&single_order, speed).evaluate(sequence);

        assert_eq!(
            evaluation,
            RouteEvaluation::Infeasible(Infeasibility::DeliveryBeforePickup {
                consumer: ConsumerId(1),
                restaurant: RestaurantId(1),
            })
        );
        assert_eq!(evaluation.total_minutes(), f64::INFINITY);
        assert!(evaluation.events().is_empty());
    }

    #[rstest]
    fn missing_consumer_is_infeasible(single_order: DeliveryProblem, speed: Speed) {
        let sequence = stops(&single_order, &["R1"]);
        let evaluation = TimingSimulator::new(&single_order, speed).evaluate(sequence);

        assert_eq!(
            evaluation,
            RouteEvaluation::Infeasible(Infeasibility::Undelivered {
                consumer: ConsumerId(1),
            })
        );
        assert!(evaluation.events().is_empty());
    }

    #[rstest]
    fn foreign_consumer_is_infeasible(single_order: DeliveryProblem, speed: Speed) {
        let stranger = Stop::Consumer(consumer(9, 0.0, 0.0, 9));
        let mut sequence = stops(&single_order, &["R1", "C1"]);
        sequence.push(&stranger);
        let evaluation = TimingSimulator::new(&single_order, speed).evaluate(sequence);

        assert_eq!(
            evaluation,
            RouteEvaluation::Infeasible(Infeasibility::UnknownRestaurant {
                consumer: ConsumerId(9),
                restaurant: RestaurantId(9),
            })
        );
    }

    #[rstest]
    fn late_arrival_does_not_wait(speed: Speed) {
        // Restaurant is ~11 km north: 22 minutes at 30 km/h, prep takes 5.
        let problem = problem(
            location("Delivery Agent", 0.0, 0.0),
            vec![(restaurant(1, 0.1, 0.0, 5.0), consumer(1, 0.1, 0.0, 1))],
        );
        let evaluation = TimingSimulator::new(&problem, speed).evaluate(problem.stops());
        match evaluation.events() {
            [TimelineEvent::Arrived { waited_minutes, at_minutes, .. }, TimelineEvent::Delivered { at_minutes: delivered, .. }] =>
            {
                assert_eq!(*waited_minutes, 0.0);
                assert!(*at_minutes > 5.0);
                assert_eq!(at_minutes, delivered);
            }
            other => panic!("unexpected timeline {other:?}"),
        }
    }

    #[rstest]
    fn agent_waypoint_adds_travel_without_events(single_order: DeliveryProblem, speed: Speed) {
        let detour = Stop::Agent(location("Depot", 0.0, 0.0));
        let mut sequence = stops(&single_order, &["R1"]);
        sequence.push(&detour);
        sequence.extend(stops(&single_order, &["C1"]));

        let direct = TimingSimulator::new(&single_order, speed).evaluate(single_order.stops());
        let evaluation = TimingSimulator::new(&single_order, speed).evaluate(sequence);
        assert_eq!(evaluation.events().len(), 2);
        assert!(evaluation.total_minutes() > direct.total_minutes());
    }

    #[rstest]
    fn evaluations_do_not_share_state(single_order: DeliveryProblem, speed: Speed) {
        let simulator = TimingSimulator::new(&single_order, speed);
        let first = simulator.evaluate(single_order.stops());
        let _rejected = simulator.evaluate(stops(&single_order, &["C1", "R1"]));
        let again = simulator.evaluate(single_order.stops());
        assert_eq!(first, again);
    }

    #[rstest]
    fn events_render_to_one_decimal_place() {
        let arrived = TimelineEvent::Arrived {
            stop: "R2".into(),
            at_minutes: 12.345,
            waited_minutes: 0.04,
        };
        let delivered = TimelineEvent::Delivered {
            stop: "C2".into(),
            at_minutes: 19.96,
        };
        assert_eq!(arrived.to_string(), "Arrived at R2 at 12.3 min, waited 0.0 min");
        assert_eq!(delivered.to_string(), "Delivered to C2 at 20.0 min");
    }
}
