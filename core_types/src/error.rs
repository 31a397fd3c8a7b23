//! Simulator error types

use thiserror::Error;

/// Errors surfaced by the orchestrator and the engine
///
/// Validation collects every problem before rejecting, so `InvalidWorkload`
/// carries the full list of human-readable messages rather than the first
/// one encountered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// The workload or configuration failed up-front validation
    #[error("invalid workload: {}", .messages.join("; "))]
    InvalidWorkload { messages: Vec<String> },

    /// The requested discipline name is not recognized
    #[error("unknown discipline: {0}")]
    UnknownDiscipline(String),

    /// The engine reached its hard iteration limit without terminating
    #[error("simulation exceeded the {cap}-tick iteration cap")]
    IterationCapExceeded { cap: u64 },
}
