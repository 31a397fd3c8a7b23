//! Timeline consolidation
//!
//! Coalesces the engine's one-slot-per-tick record into display blocks.
//! Adjacent slots merge only when they agree on kind, pid and queue level
//! and are contiguous in time, so an idle gap or a level change always
//! starts a new block.

use core_types::{Pid, Tick};
use serde::{Deserialize, Serialize};
use sim_engine::{RawSlot, SlotKind};

/// One consolidated block of CPU occupancy, `[start, end)` in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBlock {
    #[serde(rename = "type")]
    pub kind: SlotKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<Pid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    pub start_time: Tick,
    pub end_time: Tick,
    pub duration: u64,
}

impl TimelineBlock {
    fn open(slot: &RawSlot) -> Self {
        Self {
            kind: slot.kind,
            pid: slot.pid,
            level: slot.level,
            start_time: slot.tick,
            end_time: slot.tick + 1,
            duration: 1,
        }
    }

    fn absorbs(&self, slot: &RawSlot) -> bool {
        self.kind == slot.kind
            && self.pid == slot.pid
            && self.level == slot.level
            && self.end_time == slot.tick
    }
}

/// Walks the raw timeline and coalesces it into blocks
pub fn consolidate(raw: &[RawSlot]) -> Vec<TimelineBlock> {
    let mut blocks: Vec<TimelineBlock> = Vec::new();
    for slot in raw {
        match blocks.last_mut() {
            Some(block) if block.absorbs(slot) => {
                block.end_time += 1;
                block.duration += 1;
            }
            _ => blocks.push(TimelineBlock::open(slot)),
        }
    }
    blocks
}
