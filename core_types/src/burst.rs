//! CPU and I/O bursts
//!
//! A process's demand is an alternating sequence of bursts. The sequence is
//! produced by [`crate::ProcessSpec::expand_bursts`] and always starts with a
//! CPU burst; it may end with an I/O burst when the last split point sits at
//! the very end of the CPU time.

use serde::{Deserialize, Serialize};

/// What a burst demands from the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BurstKind {
    /// The process needs the CPU
    Cpu,
    /// The process is blocked on a device
    Io,
}

/// One contiguous span of CPU or I/O demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burst {
    pub kind: BurstKind,
    /// Duration in ticks, at least 1
    pub duration: u64,
}

impl Burst {
    /// Creates a CPU burst
    pub fn cpu(duration: u64) -> Self {
        Self {
            kind: BurstKind::Cpu,
            duration,
        }
    }

    /// Creates an I/O burst
    pub fn io(duration: u64) -> Self {
        Self {
            kind: BurstKind::Io,
            duration,
        }
    }

    /// Returns true for a CPU burst
    pub fn is_cpu(&self) -> bool {
        self.kind == BurstKind::Cpu
    }
}
