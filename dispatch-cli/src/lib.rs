//! Command-line interface for the Dispatch delivery route optimiser.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod report;
mod solve;

pub use error::CliError;
pub use report::ReportFormat;

use solve::{SolveArgs, run_solve};

pub(crate) const ARG_SOLVE_REQUEST: &str = "request";
pub(crate) const ARG_SOLVE_SPEED_KMH: &str = "speed-kmh";
pub(crate) const ARG_SOLVE_FORMAT: &str = "format";
pub(crate) const ARG_SOLVE_OUTPUT: &str = "output";
pub(crate) const ENV_SOLVE_REQUEST: &str = "DISPATCH_CMDS_SOLVE_REQUEST_PATH";

/// Run the Dispatch CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dispatch",
    about = "Plan the fastest pickup and delivery route for a single agent",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the fastest route for the orders in a JSON request.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
