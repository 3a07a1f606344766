//! Error types emitted by the Dispatch CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use dispatch_core::{ConfigError, SolveError, SolveRequestValidationError};
use thiserror::Error;

/// Errors emitted by the Dispatch CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass it as an argument or set {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the solve request file failed.
    #[error("failed to open solve request at {path:?}: {source}")]
    OpenSolveRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Solve request JSON could not be decoded.
    #[error("failed to parse solve request JSON at {path:?}: {source}")]
    ParseSolveRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The solve request payload failed validation.
    #[error("solve request in {path:?} failed validation: {source}")]
    InvalidSolveRequest {
        path: Utf8PathBuf,
        #[source]
        source: SolveRequestValidationError,
    },
    /// The `--speed-kmh` override was rejected.
    #[error("invalid --speed-kmh: {0}")]
    InvalidSpeed(#[source] ConfigError),
    /// The solver rejected the problem.
    #[error("solver failed: {source}")]
    Solve { source: SolveError },
    /// No ordering of the stops satisfied pickup-before-delivery.
    #[error("no valid route found for the orders in {path:?}")]
    NoFeasibleRoute { path: Utf8PathBuf },
    /// Serialising the solve response failed.
    #[error("failed to serialise solve response: {0}")]
    SerialiseSolveResponse(#[source] serde_json::Error),
    /// Creating the report file failed.
    #[error("failed to create report file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the solve output failed.
    #[error("failed to write solve output: {0}")]
    WriteSolveOutput(#[source] std::io::Error),
}
