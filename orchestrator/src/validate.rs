//! Up-front workload and configuration validation
//!
//! Everything is checked before any state is built; a rejected input
//! produces the full list of problems and no partial run.

use core_types::{ProcessSpec, SimConfig, SimError};
use std::collections::HashSet;

/// Validates a workload and configuration pair
pub fn validate(workload: &[ProcessSpec], config: &SimConfig) -> Result<(), SimError> {
    let mut messages = Vec::new();

    if workload.is_empty() {
        messages.push("workload must contain at least one process".to_string());
    }

    let mut seen = HashSet::new();
    for spec in workload {
        if !seen.insert(spec.pid) {
            messages.push(format!("duplicate pid {}", spec.pid));
        }
        spec.validate_into(&mut messages);
    }

    config.validate_into(&mut messages);

    if messages.is_empty() {
        Ok(())
    } else {
        Err(SimError::InvalidWorkload { messages })
    }
}
