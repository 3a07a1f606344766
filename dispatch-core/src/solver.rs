use std::time::Duration;

use thiserror::Error;

use crate::{DeliveryProblem, PlannedRoute, TimelineEvent};

/// Execution metadata for a solve.
///
/// Diagnostics are informational and may vary between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Total wall-clock time spent solving.
    pub solve_time: Duration,
    /// Number of candidate orderings evaluated.
    pub candidates_evaluated: u64,
    /// Number of evaluated orderings that were feasible.
    pub feasible_candidates: u64,
}

/// Response from a completed solve.
///
/// `route` is `None` when no ordering satisfies pickup-before-delivery; that
/// is a normal outcome, distinct from a [`SolveError`].
///
/// # Examples
/// ```rust
/// use dispatch_core::{Diagnostics, SolveResponse};
///
/// let response = SolveResponse {
///     route: None,
///     diagnostics: Diagnostics::default(),
/// };
/// assert!(response.total_minutes().is_infinite());
/// assert!(response.events().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResponse {
    /// The fastest feasible route, if any.
    pub route: Option<PlannedRoute>,
    /// Execution metadata.
    pub diagnostics: Diagnostics,
}

impl SolveResponse {
    /// Total minutes of the chosen route, or [`f64::INFINITY`] without one.
    pub fn total_minutes(&self) -> f64 {
        self.route
            .as_ref()
            .map_or(f64::INFINITY, |route| route.total_minutes)
    }

    /// Timeline of the chosen route; empty without one.
    pub fn events(&self) -> &[TimelineEvent] {
        match &self.route {
            Some(route) => &route.events,
            None => &[],
        }
    }
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The problem has more orders than the solver is willing to enumerate.
    #[error("{orders} orders exceed the limit of {limit}")]
    TooManyOrders {
        /// Orders in the problem.
        orders: usize,
        /// Largest order count the solver accepts.
        limit: usize,
    },
}

/// Order the stops of a delivery problem into a route.
///
/// Implementations return [`SolveError`] for problems they refuse to handle
/// rather than panicking. Solvers must be `Send + Sync` to operate safely
/// across threads.
pub trait Solver: Send + Sync {
    /// Solve a problem, producing the best route found or an error.
    fn solve(&self, problem: &DeliveryProblem) -> Result<SolveResponse, SolveError>;
}
