//! Telemetry utilities for operation timing and log setup.

use crate::ops::OperationKind;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Guard for timing an operation run.
///
/// Logs the elapsed time when dropped.
pub struct OperationTimer {
    kind: OperationKind,
    start: Instant,
}

impl OperationTimer {
    /// Start timing an operation.
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            start: Instant::now(),
        }
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!(operation = %self.kind, elapsed_ms, "Operation finished");
    }
}

/// Install the global subscriber.
///
/// Filter comes from `RUST_LOG` (default `info`). Output goes to stderr so
/// stdout carries only operation output.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
