//! Process control block
//!
//! One PCB per process: the static attributes fixed at construction and the
//! mutable state the engine drives through the run. The engine is the sole
//! mutator; everyone else sees PCBs read-only after the run.

use core_types::{Burst, BurstKind, Pid, ProcessSpec, ProcessState, Tick};

/// Static attributes plus the mutable simulation state of one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessControlBlock {
    pub pid: Pid,
    pub arrival_time: Tick,
    /// Priority as submitted; aging never raises the effective priority
    /// above this value
    pub original_priority: u32,
    bursts: Vec<Burst>,
    /// Sum of CPU-burst durations, fixed at construction
    pub total_cpu_time: u64,
    /// Sum of I/O-burst durations, fixed at construction
    pub total_io_time: u64,

    pub state: ProcessState,
    burst_index: usize,
    /// Ticks left in the burst at `burst_index`
    pub remaining_burst: u64,
    /// Effective priority; decreases toward 0 under aging
    pub priority: u32,
    priority_at_ready: u32,
    /// Tick at which the process last entered a ready queue
    pub last_ready_time: Option<Tick>,
    /// Ticks from arrival to first dispatch, set exactly once
    pub response_time: Option<u64>,
    pub completion_time: Option<Tick>,
    /// MLFQ level the process currently sits on (0 = highest)
    pub queue_level: usize,
}

impl ProcessControlBlock {
    /// Builds the PCB for one workload record
    pub fn from_spec(spec: &ProcessSpec) -> Self {
        let bursts = spec.expand_bursts();
        let total_cpu_time = bursts.iter().filter(|b| b.is_cpu()).map(|b| b.duration).sum();
        let total_io_time = bursts
            .iter()
            .filter(|b| !b.is_cpu())
            .map(|b| b.duration)
            .sum();
        let remaining_burst = bursts.first().map(|b| b.duration).unwrap_or(0);
        Self {
            pid: spec.pid,
            arrival_time: spec.arrival_time,
            original_priority: spec.priority,
            bursts,
            total_cpu_time,
            total_io_time,
            state: ProcessState::New,
            burst_index: 0,
            remaining_burst,
            priority: spec.priority,
            priority_at_ready: spec.priority,
            last_ready_time: None,
            response_time: None,
            completion_time: None,
            queue_level: 0,
        }
    }

    /// Runs one CPU tick; true iff the current burst just reached zero
    pub fn execute_tick(&mut self) -> bool {
        if self.remaining_burst == 0 {
            return false;
        }
        self.remaining_burst -= 1;
        self.remaining_burst == 0
    }

    /// Moves to the next burst; false when no bursts remain
    pub fn advance_burst(&mut self) -> bool {
        self.burst_index += 1;
        match self.bursts.get(self.burst_index) {
            Some(burst) => {
                self.remaining_burst = burst.duration;
                true
            }
            None => {
                self.remaining_burst = 0;
                false
            }
        }
    }

    /// True once the burst sequence is exhausted
    pub fn is_complete(&self) -> bool {
        self.burst_index >= self.bursts.len()
    }

    /// The burst currently being serviced, if any
    pub fn current_burst(&self) -> Option<&Burst> {
        self.bursts.get(self.burst_index)
    }

    /// Kind of the current burst, if any
    pub fn current_burst_kind(&self) -> Option<BurstKind> {
        self.current_burst().map(|b| b.kind)
    }

    /// Full burst sequence
    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    /// Marks the process READY and restarts its ready-wait clock
    pub fn enter_ready(&mut self, now: Tick) {
        self.state = ProcessState::Ready;
        self.last_ready_time = Some(now);
        self.priority_at_ready = self.priority;
    }

    /// Marks the process RUNNING; the first dispatch fixes the response time
    pub fn mark_running(&mut self, now: Tick) {
        self.state = ProcessState::Running;
        if self.response_time.is_none() {
            self.response_time = Some(now.saturating_sub(self.arrival_time));
        }
    }

    /// Marks the process WAITING on its current I/O burst
    pub fn enter_waiting(&mut self) {
        self.state = ProcessState::Waiting;
    }

    /// Marks the process TERMINATED; the PCB is frozen afterwards
    pub fn complete(&mut self, at: Tick) {
        self.state = ProcessState::Terminated;
        self.completion_time = Some(at);
    }

    /// Lowers the effective priority by one step per full `interval` waited
    ///
    /// The decrease is computed from the priority the process carried when
    /// it entered the queue, so repeated applications at the same tick are
    /// idempotent. A zero interval disables aging.
    pub fn apply_aging(&mut self, now: Tick, interval: u64, boost: u32) {
        if interval == 0 {
            return;
        }
        let Some(since) = self.last_ready_time else {
            return;
        };
        let steps = now.saturating_sub(since) / interval;
        if steps == 0 {
            return;
        }
        let decrease = steps.saturating_mul(u64::from(boost));
        let decrease = u32::try_from(decrease).unwrap_or(u32::MAX);
        self.priority = self.priority_at_ready.saturating_sub(decrease);
    }
}
