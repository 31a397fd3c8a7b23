//! The per-tick simulation engine
//!
//! One [`SimulationEngine`] owns the process table and every queue for the
//! duration of a run. Each tick performs, in order: arrival admission, I/O
//! completion, context-switch debit, the preemption check, MLFQ aging,
//! selection, and execution — and contributes exactly one slot (process,
//! idle or context switch) to the raw timeline.
//!
//! Timestamp convention: tick `t` covers `[t, t+1)`. Events observed at the
//! top of a tick (admission, I/O completion, preemption, dispatch) are
//! stamped `t`; events produced by executing the tick (a burst reaching
//! zero) are stamped `t + 1`.

use crate::io_queue::IoQueue;
use crate::mlfq::MultiLevelQueue;
use crate::pcb::ProcessControlBlock;
use crate::policy;
use crate::ready_queue::ReadyQueue;
use crate::table::ProcessTable;
use crate::timeline::RawSlot;
use core_types::{
    BurstKind, Discipline, Pid, ProcessState, SimConfig, SimError, StateTransition, Tick,
};
use log::{debug, trace};

/// Hard guard against pathological inputs
pub const MAX_TICKS: Tick = 10_000;

/// The ready structure a discipline schedules over
#[derive(Debug)]
enum ReadyStructure {
    Single(ReadyQueue),
    Feedback(MultiLevelQueue),
}

/// Everything the engine emits for one run
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    /// One slot per simulated tick
    pub raw_timeline: Vec<RawSlot>,
    /// Every state change, in `(time, insertion)` order
    pub transitions: Vec<StateTransition>,
    /// Final PCBs, sorted by pid
    pub processes: Vec<ProcessControlBlock>,
    /// Tick at which the last process terminated
    pub total_time: Tick,
    /// Ticks a process occupied the CPU
    pub cpu_busy_ticks: u64,
}

/// Discrete-event scheduler simulation
///
/// Non-reentrant: build one engine per run and call [`SimulationEngine::run`]
/// once.
pub struct SimulationEngine {
    discipline: Discipline,
    config: SimConfig,
    table: ProcessTable,
    ready: ReadyStructure,
    io: IoQueue,
    arrival_order: Vec<Pid>,
    arrival_index: usize,
    current_time: Tick,
    running: Option<Pid>,
    time_in_slice: u64,
    current_quantum: Option<u64>,
    context_switch_remaining: u64,
    cpu_busy_ticks: u64,
    completed: usize,
    raw_timeline: Vec<RawSlot>,
    transitions: Vec<StateTransition>,
}

impl SimulationEngine {
    /// Takes ownership of a freshly built population
    pub fn new(discipline: Discipline, config: SimConfig, pcbs: Vec<ProcessControlBlock>) -> Self {
        let ready = match discipline {
            Discipline::Mlfq => ReadyStructure::Feedback(MultiLevelQueue::new(
                config.q1_time_quantum,
                config.q2_time_quantum,
            )),
            _ => ReadyStructure::Single(ReadyQueue::new()),
        };
        let table = ProcessTable::new(pcbs);
        let arrival_order = table.pids_in_arrival_order();
        Self {
            discipline,
            config,
            table,
            ready,
            io: IoQueue::new(),
            arrival_order,
            arrival_index: 0,
            current_time: 0,
            running: None,
            time_in_slice: 0,
            current_quantum: None,
            context_switch_remaining: 0,
            cpu_busy_ticks: 0,
            completed: 0,
            raw_timeline: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Runs the simulation to completion
    pub fn run(mut self) -> Result<EngineOutput, SimError> {
        let population = self.table.len();
        debug!("{}: starting run over {} processes", self.discipline, population);

        while self.completed < population {
            if self.current_time >= MAX_TICKS {
                return Err(SimError::IterationCapExceeded { cap: MAX_TICKS });
            }
            self.step();
        }

        debug!(
            "{}: finished at tick {} ({} busy)",
            self.discipline, self.current_time, self.cpu_busy_ticks
        );
        Ok(EngineOutput {
            raw_timeline: self.raw_timeline,
            transitions: self.transitions,
            processes: self.table.into_pcbs_by_pid(),
            total_time: self.current_time,
            cpu_busy_ticks: self.cpu_busy_ticks,
        })
    }

    /// One simulated tick
    fn step(&mut self) {
        let now = self.current_time;

        self.admit_arrivals(now);
        self.complete_io(now);

        // an I/O completion can conclude the run at the top of a tick
        if self.completed == self.table.len() {
            return;
        }

        if self.debit_context_switch(now) {
            return;
        }

        let displaced = self.check_preemption(now);

        // a preemption with a context-switch cost turns the rest of this
        // tick into the first debit tick
        if self.debit_context_switch(now) {
            return;
        }

        if let ReadyStructure::Feedback(levels) = &mut self.ready {
            levels.apply_aging(&mut self.table, now, self.config.aging_interval);
        }

        self.select_next(now, displaced);
        self.execute_or_idle(now);

        self.current_time += 1;
    }

    /// Admits every process whose arrival time has been reached
    fn admit_arrivals(&mut self, now: Tick) {
        while let Some(&pid) = self.arrival_order.get(self.arrival_index) {
            if self.table[pid].arrival_time > now {
                break;
            }
            self.arrival_index += 1;
            self.make_ready(pid, now, 0);
        }
    }

    /// Ticks the I/O queue and re-admits or terminates finished waiters
    fn complete_io(&mut self, now: Tick) {
        for pid in self.io.tick() {
            if self.table[pid].advance_burst() {
                let level = match &self.ready {
                    ReadyStructure::Feedback(_) => {
                        MultiLevelQueue::promoted_level(self.table[pid].queue_level)
                    }
                    ReadyStructure::Single(_) => 0,
                };
                self.make_ready(pid, now, level);
            } else {
                // I/O was the last burst
                self.terminate(pid, now, ProcessState::Waiting);
            }
        }
    }

    /// Pays one tick of a pending context switch; true when it did
    fn debit_context_switch(&mut self, now: Tick) -> bool {
        if self.context_switch_remaining == 0 {
            return false;
        }
        self.context_switch_remaining -= 1;
        self.raw_timeline.push(RawSlot::context_switch(now));
        self.current_time += 1;
        true
    }

    /// Decides whether the running process loses the CPU this tick
    ///
    /// Returns the ready process that displaced it, when the discipline
    /// hands the CPU over directly (SRTF and preemptive priority with no
    /// context-switch cost).
    fn check_preemption(&mut self, now: Tick) -> Option<Pid> {
        let running = self.running?;

        let mut displaced: Option<Pid> = None;
        let mut requeue_level: Option<usize> = None;

        match &mut self.ready {
            ReadyStructure::Feedback(levels) => {
                let level = self.table[running].queue_level;
                let quantum_spent = self
                    .current_quantum
                    .is_some_and(|quantum| self.time_in_slice >= quantum);
                if quantum_spent {
                    // full quantum burned: demote
                    requeue_level = Some(MultiLevelQueue::demoted_level(level));
                } else if levels.has_ready_above(level) {
                    requeue_level = Some(level);
                }
            }
            ReadyStructure::Single(queue) => match self.discipline {
                Discipline::RoundRobin => {
                    if self
                        .current_quantum
                        .is_some_and(|quantum| self.time_in_slice >= quantum)
                    {
                        requeue_level = Some(0);
                    }
                }
                Discipline::Srtf | Discipline::PriorityP => {
                    policy::prepare_queue(self.discipline, queue, &mut self.table, now, &self.config);
                    if let Some(head) = queue.peek() {
                        if policy::head_displaces(
                            self.discipline,
                            &self.table[head],
                            &self.table[running],
                        ) {
                            if self.config.context_switch_time == 0 {
                                displaced = queue.dequeue();
                            }
                            requeue_level = Some(0);
                        }
                    }
                }
                _ => {}
            },
        }

        if let Some(level) = requeue_level {
            trace!("tick {}: preempting {}", now, self.table[running].pid);
            self.preempt_running(now, level);
        }
        displaced
    }

    /// Moves the running process back to ready at `level`
    fn preempt_running(&mut self, now: Tick, level: usize) {
        if let Some(pid) = self.running.take() {
            self.make_ready(pid, now, level);
            self.time_in_slice = 0;
            self.current_quantum = None;
            self.begin_context_switch();
        }
    }

    /// Picks the next process when the CPU is free
    fn select_next(&mut self, now: Tick, displaced: Option<Pid>) {
        if self.running.is_some() {
            return;
        }
        if let Some(pid) = displaced {
            self.dispatch(pid, None, now);
            return;
        }

        let selected: Option<(Pid, Option<u64>)> = match &mut self.ready {
            ReadyStructure::Single(queue) => {
                if queue.is_empty() {
                    None
                } else {
                    policy::prepare_queue(self.discipline, queue, &mut self.table, now, &self.config);
                    let quantum = policy::dispatch_quantum(self.discipline, &self.config);
                    queue.dequeue().map(|pid| (pid, quantum))
                }
            }
            ReadyStructure::Feedback(levels) => {
                levels.dequeue_next().map(|(pid, level, quantum)| {
                    self.table[pid].queue_level = level;
                    (pid, quantum)
                })
            }
        };

        if let Some((pid, quantum)) = selected {
            self.dispatch(pid, quantum, now);
        }
    }

    /// Hands the CPU to `pid` for a fresh slice
    fn dispatch(&mut self, pid: Pid, quantum: Option<u64>, now: Tick) {
        trace!("tick {}: dispatching {}", now, pid);
        self.table[pid].mark_running(now);
        self.running = Some(pid);
        self.time_in_slice = 0;
        self.current_quantum = quantum;
        self.push_transition(now, pid, ProcessState::Ready, ProcessState::Running);
    }

    /// Executes one tick of the running process, or records an idle tick
    fn execute_or_idle(&mut self, now: Tick) {
        let Some(pid) = self.running else {
            self.raw_timeline.push(RawSlot::idle(now));
            return;
        };

        let level = match &self.ready {
            ReadyStructure::Feedback(_) => Some(self.table[pid].queue_level),
            ReadyStructure::Single(_) => None,
        };
        self.raw_timeline.push(RawSlot::process(now, pid, level));
        self.cpu_busy_ticks += 1;
        let burst_finished = self.table[pid].execute_tick();
        self.time_in_slice += 1;

        if !burst_finished {
            return;
        }

        // the burst ended during [now, now+1): its consequences are stamped now+1
        if !self.table[pid].advance_burst() {
            self.release_cpu();
            self.terminate(pid, now + 1, ProcessState::Running);
            self.begin_context_switch();
        } else if self.table[pid].current_burst_kind() == Some(BurstKind::Io) {
            self.release_cpu();
            let duration = self.table[pid].remaining_burst;
            self.io.push(pid, duration);
            self.table[pid].enter_waiting();
            self.push_transition(now + 1, pid, ProcessState::Running, ProcessState::Waiting);
            self.begin_context_switch();
        }
        // a CPU burst following a CPU burst cannot occur: expansion always
        // alternates; the process simply keeps the CPU in that case
    }

    fn release_cpu(&mut self) {
        self.running = None;
        self.time_in_slice = 0;
        self.current_quantum = None;
    }

    /// Marks `pid` terminated at `at`
    fn terminate(&mut self, pid: Pid, at: Tick, from: ProcessState) {
        self.table[pid].complete(at);
        self.completed += 1;
        self.push_transition(at, pid, from, ProcessState::Terminated);
    }

    /// Starts a context-switch debit if configured and work remains
    fn begin_context_switch(&mut self) {
        if self.config.context_switch_time > 0 && self.completed < self.table.len() {
            self.context_switch_remaining = self.config.context_switch_time;
        }
    }

    /// Enqueues `pid` into the ready structure and records the transition
    fn make_ready(&mut self, pid: Pid, now: Tick, level: usize) {
        let from = self.table[pid].state;
        self.table[pid].enter_ready(now);
        match &mut self.ready {
            ReadyStructure::Single(queue) => queue.enqueue(pid),
            ReadyStructure::Feedback(levels) => {
                let level = levels.enqueue(pid, level);
                self.table[pid].queue_level = level;
            }
        }
        self.push_transition(now, pid, from, ProcessState::Ready);
    }

    fn push_transition(&mut self, time: Tick, pid: Pid, from: ProcessState, to: ProcessState) {
        debug_assert!(
            from.can_transition_to(to),
            "illegal transition {} -> {} for {}",
            from,
            to,
            pid
        );
        self.transitions.push(StateTransition { time, pid, from, to });
    }
}
