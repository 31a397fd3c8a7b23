//! Per-discipline selection and displacement policies
//!
//! The engine is written once; each discipline contributes a queue
//! preparation (which ordering puts its choice at the head), a displacement
//! rule against the running process, and a quantum. MLFQ schedules over its
//! own structure and is handled by the engine directly.

use crate::pcb::ProcessControlBlock;
use crate::ready_queue::ReadyQueue;
use crate::table::ProcessTable;
use core_types::{Discipline, SimConfig, Tick};

/// Reorders `queue` so its head is the discipline's next choice
///
/// Priority disciplines apply aging first, so the ordering (and any
/// displacement check that follows) sees current effective priorities.
pub fn prepare_queue(
    discipline: Discipline,
    queue: &mut ReadyQueue,
    table: &mut ProcessTable,
    now: Tick,
    config: &SimConfig,
) {
    match discipline {
        Discipline::Fcfs => queue.sort_by_arrival(table),
        Discipline::Sjf | Discipline::Srtf => queue.sort_by_remaining(table),
        Discipline::PriorityNp | Discipline::PriorityP => {
            queue.apply_aging(table, now, config.aging_interval, config.aging_boost);
            queue.sort_by_priority(table);
        }
        Discipline::Hrrn => queue.sort_by_response_ratio(table, now),
        // round robin is plain FIFO; MLFQ never schedules over a single queue
        Discipline::RoundRobin | Discipline::Mlfq => {}
    }
}

/// True when the prepared head displaces the running process right now
///
/// SRTF displaces on a tie as well: a ready process matching the running
/// process's remaining time takes the CPU and the incumbent re-enters at
/// the tail. Preemptive priority requires a strictly better priority.
pub fn head_displaces(
    discipline: Discipline,
    head: &ProcessControlBlock,
    running: &ProcessControlBlock,
) -> bool {
    match discipline {
        Discipline::Srtf => head.remaining_burst <= running.remaining_burst,
        Discipline::PriorityP => head.priority < running.priority,
        _ => false,
    }
}

/// Quantum granted at dispatch for single-queue disciplines
pub fn dispatch_quantum(discipline: Discipline, config: &SimConfig) -> Option<u64> {
    match discipline {
        Discipline::RoundRobin => Some(config.time_quantum),
        _ => None,
    }
}
