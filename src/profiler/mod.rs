//! Opt-in instrumentation for the propagation engine.
//!
//! # SAFETY INVARIANT
//! Profiling is a best-effort observer of the host engine.
//! It must **NEVER** feed back into propagation or search decisions; the
//! monitor exists solely so a finished run can be inspected.
//!
//! # PROTOCOL INVARIANT
//! The host drives the monitor through strictly paired begin/end calls with
//! at most one constraint phase and at most one demon run open at a time.
//! Mismatched calls panic: silently corrupted statistics are worse than a
//! crash.

pub mod clock;
pub mod record;
pub mod recorder;
pub mod report;
pub mod stats;

use std::path::PathBuf;

use thiserror::Error;

/// Operational (recoverable) profiler errors. Contract violations in the
/// ingestion calls panic instead, see the module header.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("report sink {} unavailable: {source}", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How much profiling the host engine asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileLevel {
    Off,
    Normal,
}

/// Builds a monitor when profiling is switched on. `Off` costs nothing.
pub fn build_monitor(level: ProfileLevel) -> Option<recorder::DemonMonitor> {
    match level {
        ProfileLevel::Off => None,
        ProfileLevel::Normal => Some(recorder::DemonMonitor::new()),
    }
}
