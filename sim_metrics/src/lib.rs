//! # Simulation Metrics
//!
//! Post-processing for a finished engine run: block consolidation of the
//! raw timeline and derivation of aggregate and per-process performance
//! metrics. Everything here is a pure function of the engine output; the
//! numbers shown mid-animation by the host are approximations, these are
//! the final ones.

pub mod consolidate;
pub mod metrics;

pub use consolidate::{consolidate, TimelineBlock};
pub use metrics::{derive_metrics, snapshot_processes, ProcessMetrics, ProcessSnapshot, RunMetrics};
