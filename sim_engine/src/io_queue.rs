//! Blocked-process queue
//!
//! Holds every process waiting on an I/O burst. All waiters age one tick in
//! parallel; completions come back as one batch in the order the processes
//! entered the queue, which keeps runs reproducible.
//!
//! A process blocks at the end of the tick its CPU burst finished, so its
//! I/O occupies the following ticks. The first `tick` call after enqueueing
//! only starts the burst; counting down begins one tick later. Without that
//! offset an I/O burst would finish a tick early and a process could
//! complete before `arrival + cpu + io`.

use core_types::Pid;

#[derive(Debug, Clone)]
struct IoEntry {
    pid: Pid,
    remaining: u64,
    started: bool,
}

/// Set of processes blocked on I/O
#[derive(Debug, Clone, Default)]
pub struct IoQueue {
    waiting: Vec<IoEntry>,
}

impl IoQueue {
    pub fn new() -> Self {
        Self {
            waiting: Vec::new(),
        }
    }

    /// Adds a process with its I/O duration
    pub fn push(&mut self, pid: Pid, duration: u64) {
        self.waiting.push(IoEntry {
            pid,
            remaining: duration,
            started: false,
        });
    }

    /// Ages every started waiter by one tick; returns the pids whose I/O
    /// completed, in enqueue order
    pub fn tick(&mut self) -> Vec<Pid> {
        let mut completed = Vec::new();
        self.waiting.retain_mut(|entry| {
            if !entry.started {
                entry.started = true;
                return true;
            }
            entry.remaining = entry.remaining.saturating_sub(1);
            if entry.remaining == 0 {
                completed.push(entry.pid);
                false
            } else {
                true
            }
        });
        completed
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.waiting.iter().any(|entry| entry.pid == pid)
    }
}
