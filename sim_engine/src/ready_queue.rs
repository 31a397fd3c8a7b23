//! Ready queue with stable policy orderings
//!
//! A FIFO of pid handles plus the in-place reorderings the disciplines need.
//! Every reordering is a stable sort sharing one tie-break chain: the policy
//! key, then arrival time, then pid. Stability matters — a same-key group
//! keeps its queue order, which is how same-tick arrivals stay in admission
//! order.

use crate::pcb::ProcessControlBlock;
use crate::table::ProcessTable;
use core_types::{Pid, Tick};
use std::collections::VecDeque;

/// Ordered collection of runnable processes
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    queue: VecDeque<Pid>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Appends at the tail
    pub fn enqueue(&mut self, pid: Pid) {
        self.queue.push_back(pid);
    }

    /// Removes and returns the head, or `None` when empty
    pub fn dequeue(&mut self) -> Option<Pid> {
        self.queue.pop_front()
    }

    /// Removes the first entry with a matching pid
    pub fn remove(&mut self, pid: Pid) -> Option<Pid> {
        let position = self.queue.iter().position(|&candidate| candidate == pid)?;
        self.queue.remove(position)
    }

    /// Head without removal
    pub fn peek(&self) -> Option<Pid> {
        self.queue.front().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.queue.contains(&pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pid> {
        self.queue.iter()
    }

    /// Current queue contents, head first
    pub fn snapshot(&self) -> Vec<Pid> {
        self.queue.iter().copied().collect()
    }

    /// Stable reorder by `(arrival, pid)`
    pub fn sort_by_arrival(&mut self, table: &ProcessTable) {
        self.sort_with(table, |pcb| pcb.arrival_time);
    }

    /// Stable reorder by `(remaining burst, arrival, pid)`
    pub fn sort_by_remaining(&mut self, table: &ProcessTable) {
        self.sort_with(table, |pcb| pcb.remaining_burst);
    }

    /// Stable reorder by `(effective priority, arrival, pid)`
    pub fn sort_by_priority(&mut self, table: &ProcessTable) {
        self.sort_with(table, |pcb| u64::from(pcb.priority));
    }

    /// Stable reorder by descending response ratio at `now`, then the
    /// tie-break chain
    ///
    /// The ratio `(now − arrival + remaining) / remaining` is compared by
    /// cross-multiplication so equal ratios stay exactly equal; `remaining`
    /// is at least 1 for every queued process.
    pub fn sort_by_response_ratio(&mut self, table: &ProcessTable, now: Tick) {
        self.queue.make_contiguous().sort_by(|&a, &b| {
            let pa = &table[a];
            let pb = &table[b];
            let num_a = now.saturating_sub(pa.arrival_time) + pa.remaining_burst;
            let num_b = now.saturating_sub(pb.arrival_time) + pb.remaining_burst;
            (num_b * pa.remaining_burst)
                .cmp(&(num_a * pb.remaining_burst))
                .then(pa.arrival_time.cmp(&pb.arrival_time))
                .then(pa.pid.cmp(&pb.pid))
        });
    }

    /// Applies priority aging to every queued process
    pub fn apply_aging(&mut self, table: &mut ProcessTable, now: Tick, interval: u64, boost: u32) {
        for &pid in self.queue.iter() {
            table[pid].apply_aging(now, interval, boost);
        }
    }

    fn sort_with(&mut self, table: &ProcessTable, key: impl Fn(&ProcessControlBlock) -> u64) {
        self.queue.make_contiguous().sort_by(|&a, &b| {
            let pa = &table[a];
            let pb = &table[b];
            key(pa)
                .cmp(&key(pb))
                .then(pa.arrival_time.cmp(&pb.arrival_time))
                .then(pa.pid.cmp(&pb.pid))
        });
    }
}
