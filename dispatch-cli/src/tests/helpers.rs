//! Test helpers for writing request files and capturing solver settings.

use std::cell::Cell;

use camino::{Utf8Path, Utf8PathBuf};
use dispatch_core::{OrderRequest, PointRequest, SolveRequest, Solver};
use dispatch_solver_exhaustive::{ExhaustiveSolver, SearchConfig};
use tempfile::TempDir;

use crate::solve::SolveSolverBuilder;

/// Bengaluru street corner shared by every stop of [`co_located_request`].
pub(super) const CORNER: (f64, f64) = (12.9279, 77.6271);

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// One order whose agent, restaurant and consumer share a position; the
/// best route takes exactly the ten-minute preparation time.
pub(super) fn co_located_request() -> SolveRequest {
    SolveRequest {
        agent: PointRequest::new(CORNER.0, CORNER.1),
        orders: vec![OrderRequest {
            restaurant: PointRequest::new(CORNER.0, CORNER.1),
            prep_time_minutes: 10.0,
            consumer: PointRequest::new(CORNER.0, CORNER.1),
        }],
        speed_kmh: None,
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &SolveRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

/// Builds the real solver while remembering the settings it was given.
#[derive(Debug, Default)]
pub(super) struct RecordingSolverBuilder {
    pub(super) config: Cell<Option<SearchConfig>>,
}

impl SolveSolverBuilder for RecordingSolverBuilder {
    fn build(&self, config: SearchConfig) -> Box<dyn Solver> {
        self.config.set(Some(config));
        Box::new(ExhaustiveSolver::with_config(config))
    }
}
