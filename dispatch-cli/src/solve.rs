//! Solve command implementation for the Dispatch CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use dispatch_core::{DeliveryProblem, SolveRequest, SolveResponse, Solver, Speed};
use dispatch_fs::{create_utf8_file, is_regular_file, open_utf8_file};
use dispatch_solver_exhaustive::{ExhaustiveSolver, SearchConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::report::{ReportFormat, write_report};
use crate::{
    ARG_SOLVE_FORMAT, ARG_SOLVE_OUTPUT, ARG_SOLVE_REQUEST, ARG_SOLVE_SPEED_KMH, CliError,
    ENV_SOLVE_REQUEST,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Find the fastest route for a single delivery agent. The \
                 request is a JSON file listing the agent's position and up \
                 to five orders, each a restaurant with its preparation time \
                 and the consumer it serves. Options can also come from \
                 configuration files or DISPATCH_* environment variables.",
    about = "Solve a delivery routing request"
)]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing a SolveRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Agent speed in km/h, overriding the request and the default.
    #[arg(long = ARG_SOLVE_SPEED_KMH, value_name = "kmh")]
    #[serde(default)]
    pub(crate) speed_kmh: Option<f64>,
    /// Report format.
    #[arg(long = ARG_SOLVE_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<ReportFormat>,
    /// Write the report to this file instead of standard output.
    #[arg(long = ARG_SOLVE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Speed override; the request's own speed applies when absent.
    pub(crate) speed_kmh: Option<f64>,
    /// Report format.
    pub(crate) format: ReportFormat,
    /// Report destination; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_SOLVE_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match is_regular_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Search settings for `request`, preferring the command-line speed.
    ///
    /// The request's own speed is validated even when overridden.
    fn search_config(&self, request: &SolveRequest) -> Result<SearchConfig, CliError> {
        let request_speed = request
            .speed()
            .map_err(|source| CliError::InvalidSolveRequest {
                path: self.request_path.clone(),
                source,
            })?;
        let speed = match self.speed_kmh {
            Some(speed_kmh) => Speed::from_kmh(speed_kmh).map_err(CliError::InvalidSpeed)?,
            None => request_speed.unwrap_or_default(),
        };
        Ok(SearchConfig {
            speed,
            ..SearchConfig::default()
        })
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;
        Ok(Self {
            request_path,
            speed_kmh: args.speed_kmh,
            format: args.format.unwrap_or_default(),
            output: args.output,
        })
    }
}

/// Builds a solver instance for the current solve invocation.
pub(super) trait SolveSolverBuilder {
    fn build(&self, config: SearchConfig) -> Box<dyn Solver>;
}

pub(super) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: SearchConfig) -> Box<dyn Solver> {
        Box::new(ExhaustiveSolver::with_config(config))
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveSolverBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_solve_config(args)?;
    let response = execute_solve(&config, builder)?;
    let route = response
        .route
        .as_ref()
        .ok_or_else(|| CliError::NoFeasibleRoute {
            path: config.request_path.clone(),
        })?;

    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_report(&mut file, route, &response, config.format)?;
            log::info!("wrote {:?} report to {path}", config.format);
            Ok(())
        }
        None => write_report(writer, route, &response, config.format),
    }
}

fn execute_solve(
    config: &SolveConfig,
    builder: &dyn SolveSolverBuilder,
) -> Result<SolveResponse, CliError> {
    let request = load_solve_request(&config.request_path)?;
    let problem = build_problem(&request, &config.request_path)?;
    let search = config.search_config(&request)?;
    log::debug!(
        "solving {} orders at {} km/h",
        problem.order_count(),
        search.speed.kmh()
    );
    let solver = builder.build(search);
    solver
        .solve(&problem)
        .map_err(|source| CliError::Solve { source })
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn build_problem(request: &SolveRequest, path: &Utf8Path) -> Result<DeliveryProblem, CliError> {
    request
        .to_problem()
        .map_err(|source| CliError::InvalidSolveRequest {
            path: path.to_path_buf(),
            source,
        })
}

/// Loads a JSON-encoded [`SolveRequest`] from disk.
pub(super) fn load_solve_request(path: &Utf8Path) -> Result<SolveRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSolveRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSolveRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
