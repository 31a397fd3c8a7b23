//! Raw per-tick timeline records
//!
//! The engine appends exactly one slot per simulated tick: the pid that
//! executed, an idle tick, or a context-switch debit tick. Post-processing
//! coalesces adjacent slots into display blocks.

use core_types::{Pid, Tick};
use serde::{Deserialize, Serialize};

/// What occupied the CPU during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotKind {
    /// A process executed
    Process,
    /// No runnable process
    Idle,
    /// Dispatch-change accounting
    ContextSwitch,
}

/// One tick of raw CPU occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSlot {
    pub tick: Tick,
    #[serde(rename = "type")]
    pub kind: SlotKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<Pid>,
    /// MLFQ level the process ran on; absent for other disciplines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
}

impl RawSlot {
    /// A tick executed by `pid`
    pub fn process(tick: Tick, pid: Pid, level: Option<usize>) -> Self {
        Self {
            tick,
            kind: SlotKind::Process,
            pid: Some(pid),
            level,
        }
    }

    /// An idle tick
    pub fn idle(tick: Tick) -> Self {
        Self {
            tick,
            kind: SlotKind::Idle,
            pid: None,
            level: None,
        }
    }

    /// A context-switch debit tick
    pub fn context_switch(tick: Tick) -> Self {
        Self {
            tick,
            kind: SlotKind::ContextSwitch,
            pid: None,
            level: None,
        }
    }
}
