//! Build-log sink for the user-facing messages of a generation run.
//!
//! The batch entry point reports start, per-file success, skips and the final
//! count through a [`BuildLog`] handed in via
//! [`crate::config::GenerationConfigBuilder::log`]. The default,
//! [`TracingLog`], forwards to `tracing`; hosts that surface messages in
//! their own UI, and tests, can pass something else (e.g. [`RecordingLog`]).
//!
//! Internal diagnostics still go straight to `tracing` at debug level.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Receives info and warning messages from a generation run.
///
/// Implementations must be `Send + Sync`: documents may be processed
/// concurrently.
pub trait BuildLog: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
}

/// Forwards messages to `tracing::info!` / `tracing::warn!`. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl BuildLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Severity of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warning,
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingLog {
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.lock().clone()
    }

    /// Messages logged at `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(LogLevel, String)>> {
        // A poisoned lock still holds every message pushed before the panic.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lock().push((level, message.to_string()));
    }
}

impl BuildLog for RecordingLog {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.push(LogLevel::Warning, message);
    }
}

/// Convenience alias matching the type stored in [`crate::config::GenerationConfig`].
pub type SharedBuildLog = Arc<dyn BuildLog>;
