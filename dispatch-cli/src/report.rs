//! Rendering of solve responses.

use std::io::Write;

use clap::ValueEnum;
use dispatch_core::{PlannedRoute, SolveResponse};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Output format for the `solve` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable route, total time and timeline.
    #[default]
    Text,
    /// The full solve response, including diagnostics, as pretty JSON.
    Json,
}

/// Write `response` to `writer` in the requested format.
pub(crate) fn write_report(
    writer: &mut dyn Write,
    route: &PlannedRoute,
    response: &SolveResponse,
    format: ReportFormat,
) -> Result<(), CliError> {
    match format {
        ReportFormat::Text => write_text(writer, route).map_err(CliError::WriteSolveOutput),
        ReportFormat::Json => write_json(writer, response),
    }
}

fn write_text(writer: &mut dyn Write, route: &PlannedRoute) -> std::io::Result<()> {
    writeln!(writer, "Optimal Route:")?;
    writeln!(writer, "{}", route.path())?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Total Estimated Time: {:.1} minutes",
        route.total_minutes
    )?;
    writeln!(writer)?;
    writeln!(writer, "Detailed Timeline:")?;
    for event in &route.events {
        writeln!(writer, "{event}")?;
    }
    Ok(())
}

fn write_json(writer: &mut dyn Write, response: &SolveResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialiseSolveResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSolveOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteSolveOutput)?;
    Ok(())
}
