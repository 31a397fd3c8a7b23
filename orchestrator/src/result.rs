//! The assembled run result

use core_types::{Discipline, StateTransition};
use serde::{Deserialize, Serialize};
use sim_engine::RawSlot;
use sim_metrics::{ProcessSnapshot, RunMetrics, TimelineBlock};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one orchestrated run
///
/// Lets the hosting application key runs (tabs, exports, comparisons)
/// without inventing its own ids. Everything else in a [`RunResult`] is a
/// deterministic function of the inputs; the id is the one exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a run ID from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run:{}", self.0)
    }
}

/// Complete output of one discipline over one workload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub id: RunId,
    pub discipline: Discipline,
    /// One entry per simulated tick
    pub raw_timeline: Vec<RawSlot>,
    /// Consolidated display blocks
    pub timeline: Vec<TimelineBlock>,
    /// Every state change, ordered by `(time, insertion)`
    pub transitions: Vec<StateTransition>,
    /// Final PCB snapshots, pid order
    pub processes: Vec<ProcessSnapshot>,
    pub metrics: RunMetrics,
}
