//! Exhaustive route search for the Dispatch engine.
//!
//! This crate provides [`ExhaustiveSolver`], the default implementation of
//! the [`Solver`](dispatch_core::Solver) trait. It times every ordering of a
//! problem's restaurants and consumers with
//! [`TimingSimulator`](dispatch_core::TimingSimulator) and keeps the fastest
//! feasible one.
//!
//! Orderings are generated in lexicographic order of the problem's stop
//! positions (restaurants first, then consumers) and never pruned, so a solve
//! costs `(2n)!` evaluations for `n` orders. Ties go to the ordering generated
//! first, which makes results reproducible. [`SearchConfig::max_orders`]
//! refuses problems that would take too long.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod permutations;
mod solver;

pub use permutations::Permutations;
pub use solver::{ExhaustiveSolver, SearchConfig};
