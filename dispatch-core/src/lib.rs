//! Core domain types for the Dispatch delivery route engine.
//!
//! The crate models a single delivery agent collecting orders from
//! restaurants and dropping them at consumers. It provides:
//!
//! - [`Location`], [`Restaurant`], [`Consumer`] and the [`Stop`] union over
//!   every kind of point a route may visit;
//! - [`DeliveryProblem`], a validated set of orders for one optimisation;
//! - the great-circle distance model ([`haversine_km`]) and validated
//!   travel [`Speed`];
//! - [`TimingSimulator`], which replays a candidate stop sequence and decides
//!   whether it is feasible;
//! - the [`Solver`] trait implemented by search strategies, plus the
//!   [`SolveRequest`] boundary type decoded by the CLI.
//!
//! Constructors return `Result` to surface invalid input early.
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
mod location;
mod problem;
mod request;
mod route;
mod solver;
mod stop;
pub mod timing;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::{ConfigError, DEFAULT_SPEED_KMH, EARTH_RADIUS_KM, Speed, haversine_km};
pub use location::{Location, LocationError};
pub use problem::{DeliveryProblem, ProblemError};
pub use request::{
    MAX_ORDERS, OrderRequest, PointRequest, SolveRequest, SolveRequestValidationError,
};
pub use route::PlannedRoute;
pub use solver::{Diagnostics, SolveError, SolveResponse, Solver};
pub use stop::{Consumer, ConsumerId, Restaurant, RestaurantError, RestaurantId, Stop};
pub use timing::{Infeasibility, RouteEvaluation, RouteTiming, TimelineEvent, TimingSimulator};
