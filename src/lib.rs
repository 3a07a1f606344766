//! Facade crate for the Dispatch delivery route engine.
//!
//! This crate re-exports the core domain types and exposes the exhaustive
//! solver behind a feature flag.
//!
//! # Examples
//! ```
//! # #[cfg(feature = "solver-exhaustive")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dispatch_engine::{ExhaustiveSolver, OrderRequest, PointRequest, SolveRequest, Solver};
//!
//! let request = SolveRequest {
//!     agent: PointRequest::new(12.9279, 77.6271),
//!     orders: vec![OrderRequest {
//!         restaurant: PointRequest::new(12.9279, 77.6271),
//!         prep_time_minutes: 10.0,
//!         consumer: PointRequest::new(12.9279, 77.6271),
//!     }],
//!     speed_kmh: None,
//! };
//! let response = ExhaustiveSolver::new().solve(&request.to_problem()?)?;
//! assert_eq!(response.total_minutes(), 10.0);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "solver-exhaustive"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]

pub use dispatch_core::{
    ConfigError, Consumer, ConsumerId, DEFAULT_SPEED_KMH, DeliveryProblem, Diagnostics,
    Infeasibility, Location, LocationError, MAX_ORDERS, OrderRequest, PlannedRoute, PointRequest,
    ProblemError, Restaurant, RestaurantError, RestaurantId, RouteEvaluation, RouteTiming,
    SolveError, SolveRequest, SolveRequestValidationError, SolveResponse, Solver, Speed, Stop,
    TimelineEvent, TimingSimulator, haversine_km,
};

#[cfg(feature = "solver-exhaustive")]
pub use dispatch_solver_exhaustive::{ExhaustiveSolver, Permutations, SearchConfig};
