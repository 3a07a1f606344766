//! `ExhaustiveSolver` implementation backed by brute-force enumeration.

use std::time::Instant;

use dispatch_core::{
    ConfigError, DeliveryProblem, Diagnostics, MAX_ORDERS, PlannedRoute, RouteEvaluation,
    RouteTiming, SolveError, SolveResponse, Solver, Speed, Stop, TimingSimulator,
};

use crate::Permutations;

/// Configuration for [`ExhaustiveSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Average agent speed used to convert distances into minutes.
    pub speed: Speed,
    /// Largest number of orders the solver will enumerate.
    pub max_orders: usize,
}

impl SearchConfig {
    /// Configuration with an optional speed override in km/h.
    ///
    /// # Errors
    /// Returns [`ConfigError::NonPositiveSpeed`] when `speed_kmh` is zero,
    /// negative or not finite.
    pub fn new(speed_kmh: Option<f64>) -> Result<Self, ConfigError> {
        let speed = speed_kmh.map(Speed::from_kmh).transpose()?;
        Ok(Self {
            speed: speed.unwrap_or_default(),
            ..Self::default()
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            speed: Speed::default(),
            max_orders: MAX_ORDERS,
        }
    }
}

/// Solver that times every ordering of a problem's stops.
///
/// Candidates are the permutations of [`DeliveryProblem::stops`] in
/// lexicographic order of stop position. A candidate replaces the incumbent
/// only when it is strictly faster, so among equally fast routes the one
/// generated first is returned.
///
/// # Examples
/// ```rust
/// use dispatch_core::{DeliveryProblem, Location, Solver};
/// use dispatch_core::{Consumer, ConsumerId, Restaurant, RestaurantId};
/// use dispatch_solver_exhaustive::ExhaustiveSolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let agent = Location::new("Delivery Agent", 12.9279, 77.6271)?;
/// let restaurant = Restaurant::new(
///     RestaurantId(1),
///     Location::new("R1", 12.9352, 77.6245)?,
///     10.0,
/// )?;
/// let consumer = Consumer::new(
///     ConsumerId(1),
///     Location::new("C1", 12.9304, 77.6784)?,
///     RestaurantId(1),
/// );
/// let problem = DeliveryProblem::new(agent, vec![restaurant], vec![consumer])?;
///
/// let response = ExhaustiveSolver::new().solve(&problem)?;
/// let route = response.route.expect("one order is always deliverable");
/// assert_eq!(route.path(), "R1 -> C1");
/// assert_eq!(response.diagnostics.candidates_evaluated, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveSolver {
    config: SearchConfig,
}

impl ExhaustiveSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Solver for ExhaustiveSolver {
    fn solve(&self, problem: &DeliveryProblem) -> Result<SolveResponse, SolveError> {
        let orders = problem.order_count();
        if orders > self.config.max_orders {
            return Err(SolveError::TooManyOrders {
                orders,
                limit: self.config.max_orders,
            });
        }
        let started_at = Instant::now();

        let stops = problem.stops();
        let simulator = TimingSimulator::new(problem, self.config.speed);
        let mut best: Option<(Vec<usize>, RouteTiming)> = None;
        let mut candidates_evaluated = 0_u64;
        let mut feasible_candidates = 0_u64;

        for ordering in Permutations::new(stops.len()) {
            candidates_evaluated += 1;
            let RouteEvaluation::Feasible(timing) = simulator.evaluate(arrange(stops, &ordering))
            else {
                continue;
            };
            feasible_candidates += 1;
            let improves = best
                .as_ref()
                .is_none_or(|(_, incumbent)| timing.total_minutes < incumbent.total_minutes);
            if improves {
                best = Some((ordering, timing));
            }
        }

        log::debug!(
            "evaluated {candidates_evaluated} orderings of {} stops, {feasible_candidates} feasible",
            stops.len()
        );
        if feasible_candidates == 0 {
            log::warn!(
                "no feasible route among {candidates_evaluated} orderings of {orders} orders"
            );
        }
        let route = best.map(|(ordering, timing)| {
            let planned = PlannedRoute::new(arrange(stops, &ordering).cloned().collect(), timing);
            log::debug!(
                "chose {} finishing after {:.1} minutes",
                planned.path(),
                planned.total_minutes
            );
            planned
        });

        Ok(SolveResponse {
            route,
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                candidates_evaluated,
                feasible_candidates,
            },
        })
    }
}

/// Stops of `stops` visited in the order given by `ordering`.
fn arrange<'a>(stops: &'a [Stop], ordering: &'a [usize]) -> impl Iterator<Item = &'a Stop> {
    ordering.iter().filter_map(|&index| stops.get(index))
}
