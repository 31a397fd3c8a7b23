//! Multilevel feedback queue
//!
//! A fixed stack of ready queues. Level 0 is the highest priority and has
//! the shortest quantum; the lowest level runs without a quantum. A process
//! that burns a full quantum is demoted one level, a process that returns
//! from I/O or waits long enough is promoted one level.

use crate::ready_queue::ReadyQueue;
use crate::table::ProcessTable;
use core_types::{Pid, Tick};

/// Number of feedback levels
pub const LEVELS: usize = 3;

/// Stack of ready queues with per-level quanta
#[derive(Debug, Clone)]
pub struct MultiLevelQueue {
    levels: Vec<ReadyQueue>,
    quanta: Vec<Option<u64>>,
}

impl MultiLevelQueue {
    /// Builds the three-level structure with quanta for levels 0 and 1
    pub fn new(level0_quantum: u64, level1_quantum: u64) -> Self {
        Self {
            levels: (0..LEVELS).map(|_| ReadyQueue::new()).collect(),
            quanta: vec![Some(level0_quantum), Some(level1_quantum), None],
        }
    }

    /// Appends at the tail of `level` (clamped); returns the actual level
    pub fn enqueue(&mut self, pid: Pid, level: usize) -> usize {
        let level = level.min(LEVELS - 1);
        self.levels[level].enqueue(pid);
        level
    }

    /// Removes a pid from whichever level holds it
    pub fn remove(&mut self, pid: Pid) -> Option<usize> {
        for (level, queue) in self.levels.iter_mut().enumerate() {
            if queue.remove(pid).is_some() {
                return Some(level);
            }
        }
        None
    }

    /// Head of the first non-empty level, with that level and its quantum
    pub fn peek(&self) -> Option<(Pid, usize, Option<u64>)> {
        self.levels.iter().enumerate().find_map(|(level, queue)| {
            queue.peek().map(|pid| (pid, level, self.quanta[level]))
        })
    }

    /// Dequeues the head of the first non-empty level
    pub fn dequeue_next(&mut self) -> Option<(Pid, usize, Option<u64>)> {
        for (level, queue) in self.levels.iter_mut().enumerate() {
            if let Some(pid) = queue.dequeue() {
                return Some((pid, level, self.quanta[level]));
            }
        }
        None
    }

    /// Target level after a full-quantum demotion
    pub fn demoted_level(level: usize) -> usize {
        (level + 1).min(LEVELS - 1)
    }

    /// Target level after a promotion
    pub fn promoted_level(level: usize) -> usize {
        level.saturating_sub(1)
    }

    /// True when any level above `level` holds a runnable process
    pub fn has_ready_above(&self, level: usize) -> bool {
        self.levels[..level.min(LEVELS)]
            .iter()
            .any(|queue| !queue.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|queue| queue.is_empty())
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(|queue| queue.len()).sum()
    }

    /// Contents of one level, head first
    pub fn level_snapshot(&self, level: usize) -> Vec<Pid> {
        self.levels[level].snapshot()
    }

    /// Promotes processes on levels 1 and below that have waited at least
    /// `interval` ticks since entering the ready structure
    ///
    /// A promoted process restarts its wait clock on the higher level.
    /// A zero interval disables promotion.
    pub fn apply_aging(&mut self, table: &mut ProcessTable, now: Tick, interval: u64) {
        if interval == 0 {
            return;
        }
        for level in 1..LEVELS {
            let due: Vec<Pid> = self.levels[level]
                .iter()
                .copied()
                .filter(|&pid| {
                    table[pid]
                        .last_ready_time
                        .is_some_and(|since| now.saturating_sub(since) >= interval)
                })
                .collect();
            for pid in due {
                self.levels[level].remove(pid);
                let target = Self::promoted_level(level);
                self.levels[target].enqueue(pid);
                table[pid].queue_level = target;
                table[pid].last_ready_time = Some(now);
            }
        }
    }
}
