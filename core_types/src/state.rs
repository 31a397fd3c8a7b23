//! Process lifecycle states and the transition record
//!
//! The lifecycle is a small state machine. Every state change the engine
//! performs is checked against the legal edges and recorded as a
//! [`StateTransition`], giving tests and the visualizer a complete audit
//! trail of a run.

use crate::{Pid, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a simulated process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Created but not yet admitted
    New,
    /// Waiting in a ready queue for the CPU
    Ready,
    /// Occupying the CPU
    Running,
    /// Blocked on an I/O burst
    Waiting,
    /// All bursts finished
    Terminated,
}

impl ProcessState {
    /// Returns true iff `self -> next` is a legal lifecycle edge
    pub fn can_transition_to(&self, next: ProcessState) -> bool {
        use ProcessState::*;
        matches!(
            (self, next),
            (New, Ready)
                | (Ready, Running)
                | (Running, Ready)
                | (Running, Waiting)
                | (Running, Terminated)
                | (Waiting, Ready)
                | (Waiting, Terminated)
        )
    }

    /// Returns true for the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessState::Terminated)
    }

    /// Returns the user-visible state name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessState::New => "NEW",
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Waiting => "WAITING",
            ProcessState::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded state change
///
/// Transitions are emitted in `(time, insertion)` order; two transitions at
/// the same tick keep the order in which the engine performed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub time: Tick,
    pub pid: Pid,
    pub from: ProcessState,
    pub to: ProcessState,
}
