//! Simulation configuration record

use serde::{Deserialize, Serialize};

/// Tunable options shared by every discipline
///
/// All values are in ticks. Options a discipline does not use are ignored by
/// it; the record deliberately stays flat so the hosting application can
/// round-trip it as one JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    /// Ticks debited after every dispatch change
    pub context_switch_time: u64,
    /// Round-robin quantum
    pub time_quantum: u64,
    /// Ticks a process waits in ready before one aging step; 0 disables aging
    pub aging_interval: u64,
    /// Priority decrease per aging step
    pub aging_boost: u32,
    /// MLFQ quantum for the highest level (level 0)
    pub q1_time_quantum: u64,
    /// MLFQ quantum for level 1; the lowest level runs without a quantum
    pub q2_time_quantum: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            context_switch_time: 1,
            time_quantum: 2,
            aging_interval: 0,
            aging_boost: 1,
            q1_time_quantum: 4,
            q2_time_quantum: 8,
        }
    }
}

impl SimConfig {
    /// Appends a human-readable message for every out-of-range option
    pub fn validate_into(&self, messages: &mut Vec<String>) {
        if self.time_quantum == 0 {
            messages.push("timeQuantum must be at least 1".to_string());
        }
        if self.aging_boost == 0 {
            messages.push("agingBoost must be at least 1".to_string());
        }
        if self.q1_time_quantum == 0 {
            messages.push("q1TimeQuantum must be at least 1".to_string());
        }
        if self.q2_time_quantum == 0 {
            messages.push("q2TimeQuantum must be at least 1".to_string());
        }
    }

    /// Convenience for tests and comparisons: no context-switch cost
    pub fn without_context_switch() -> Self {
        Self {
            context_switch_time: 0,
            ..Self::default()
        }
    }
}
