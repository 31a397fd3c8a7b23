//! Workload input records and burst-sequence expansion
//!
//! The input shape is one flat record per process: a total CPU time plus a
//! list of I/O requests anchored at split points inside that CPU time.
//! [`ProcessSpec::expand_bursts`] turns the record into the alternating
//! CPU/I/O sequence the engine consumes.

use crate::{Burst, Pid, Tick};
use serde::{Deserialize, Serialize};

/// An I/O request inserted into a process's CPU time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IoBurstSpec {
    /// CPU ticks executed before this I/O begins; unique per process,
    /// between 1 and the total CPU time inclusive
    pub after_cpu: u64,
    /// I/O duration in ticks, at least 1
    pub duration: u64,
}

/// One process of the input workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpec {
    pub pid: Pid,
    pub arrival_time: Tick,
    /// Total CPU time over all CPU bursts
    pub cpu_burst: u64,
    /// Lower value = higher priority
    pub priority: u32,
    pub io_enabled: bool,
    pub io_bursts: Vec<IoBurstSpec>,
}

impl ProcessSpec {
    /// Creates a CPU-only process with priority 0
    pub fn new(pid: u32, arrival_time: Tick, cpu_burst: u64) -> Self {
        Self {
            pid: Pid::new(pid),
            arrival_time,
            cpu_burst,
            priority: 0,
            io_enabled: false,
            io_bursts: Vec::new(),
        }
    }

    /// Sets the priority
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Enables I/O with the given `(afterCpu, duration)` requests
    pub fn with_io(mut self, io_bursts: &[(u64, u64)]) -> Self {
        self.io_enabled = true;
        self.io_bursts = io_bursts
            .iter()
            .map(|&(after_cpu, duration)| IoBurstSpec {
                after_cpu,
                duration,
            })
            .collect();
        self
    }

    /// Expands the record into the alternating burst sequence
    ///
    /// I/O requests are visited in ascending `after_cpu` order; the CPU time
    /// is split at each anchor and the I/O burst inserted between the two
    /// segments. Residual CPU time becomes a trailing CPU burst. An anchor at
    /// the very end of the CPU time leaves the sequence ending with I/O.
    pub fn expand_bursts(&self) -> Vec<Burst> {
        if !self.io_enabled || self.io_bursts.is_empty() {
            return vec![Burst::cpu(self.cpu_burst)];
        }

        let mut requests = self.io_bursts.clone();
        requests.sort_by_key(|io| io.after_cpu);

        let mut bursts = Vec::with_capacity(requests.len() * 2 + 1);
        let mut consumed = 0;
        for io in &requests {
            let segment = io.after_cpu.saturating_sub(consumed);
            if segment > 0 {
                bursts.push(Burst::cpu(segment));
            }
            bursts.push(Burst::io(io.duration));
            consumed = io.after_cpu;
        }
        if consumed < self.cpu_burst {
            bursts.push(Burst::cpu(self.cpu_burst - consumed));
        }
        bursts
    }

    /// Sum of the I/O durations this process will request
    pub fn total_io_time(&self) -> u64 {
        if !self.io_enabled {
            return 0;
        }
        self.io_bursts.iter().map(|io| io.duration).sum()
    }

    /// Appends a human-readable message for every invalid field
    pub fn validate_into(&self, messages: &mut Vec<String>) {
        if self.pid.as_u32() == 0 {
            messages.push("pid must be at least 1".to_string());
        }
        if self.cpu_burst == 0 {
            messages.push(format!("{}: cpuBurst must be at least 1", self.pid));
        }
        if !self.io_enabled {
            return;
        }
        let mut anchors = Vec::with_capacity(self.io_bursts.len());
        for io in &self.io_bursts {
            if io.duration == 0 {
                messages.push(format!("{}: I/O duration must be at least 1", self.pid));
            }
            if io.after_cpu == 0 || io.after_cpu > self.cpu_burst {
                messages.push(format!(
                    "{}: afterCpu {} is out of range (1..={})",
                    self.pid, io.after_cpu, self.cpu_burst
                ));
            }
            if anchors.contains(&io.after_cpu) {
                messages.push(format!(
                    "{}: duplicate afterCpu value {}",
                    self.pid, io.after_cpu
                ));
            }
            anchors.push(io.after_cpu);
        }
    }
}
