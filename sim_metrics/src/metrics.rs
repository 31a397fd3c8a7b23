//! Metric derivation
//!
//! Turnaround, waiting and response per process, plus the aggregates the
//! metric cards display. All sums iterate the engine's pid-ordered process
//! list, so equal inputs give byte-identical metrics.

use core_types::{Pid, ProcessState, Tick};
use serde::{Deserialize, Serialize};
use sim_engine::{EngineOutput, SlotKind};

/// Per-process metric row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub turnaround: u64,
    pub waiting: u64,
    pub response: u64,
}

/// Read-only view of a finished PCB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSnapshot {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub priority: u32,
    pub total_cpu_time: u64,
    pub state: ProcessState,
    pub completion_time: Tick,
    pub turnaround: u64,
    pub waiting: u64,
    pub response: u64,
}

/// Aggregate metrics over one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetrics {
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    /// Percentage of ticks a process occupied the CPU
    pub cpu_utilization: f64,
    /// Completed processes per tick
    pub throughput: f64,
    pub total_time: Tick,
    pub context_switches: u64,
    pub idle_time: u64,
    pub max_waiting: u64,
    pub max_response: u64,
    pub per_process: Vec<ProcessMetrics>,
}

fn row_for(pcb: &sim_engine::ProcessControlBlock) -> Option<ProcessMetrics> {
    let completion = pcb.completion_time?;
    let turnaround = completion - pcb.arrival_time;
    Some(ProcessMetrics {
        pid: pcb.pid,
        turnaround,
        waiting: turnaround - pcb.total_cpu_time,
        response: pcb.response_time.unwrap_or(0),
    })
}

/// Derives the aggregate metrics from a finished run
pub fn derive_metrics(output: &EngineOutput) -> RunMetrics {
    let rows: Vec<ProcessMetrics> = output.processes.iter().filter_map(row_for).collect();
    let count = rows.len() as f64;

    let total_time = output.total_time;
    let context_switches = output
        .raw_timeline
        .iter()
        .filter(|slot| slot.kind == SlotKind::ContextSwitch)
        .count() as u64;
    let idle_time = total_time - output.cpu_busy_ticks - context_switches;

    let mean = |value: u64| {
        if count > 0.0 {
            value as f64 / count
        } else {
            0.0
        }
    };

    RunMetrics {
        avg_turnaround: mean(rows.iter().map(|r| r.turnaround).sum()),
        avg_waiting: mean(rows.iter().map(|r| r.waiting).sum()),
        avg_response: mean(rows.iter().map(|r| r.response).sum()),
        cpu_utilization: if total_time > 0 {
            output.cpu_busy_ticks as f64 / total_time as f64 * 100.0
        } else {
            0.0
        },
        throughput: if total_time > 0 {
            count / total_time as f64
        } else {
            0.0
        },
        total_time,
        context_switches,
        idle_time,
        max_waiting: rows.iter().map(|r| r.waiting).max().unwrap_or(0),
        max_response: rows.iter().map(|r| r.response).max().unwrap_or(0),
        per_process: rows,
    }
}

/// Snapshots every terminated PCB for the result payload
pub fn snapshot_processes(output: &EngineOutput) -> Vec<ProcessSnapshot> {
    output
        .processes
        .iter()
        .filter_map(|pcb| {
            let completion = pcb.completion_time?;
            let turnaround = completion - pcb.arrival_time;
            Some(ProcessSnapshot {
                pid: pcb.pid,
                arrival_time: pcb.arrival_time,
                priority: pcb.original_priority,
                total_cpu_time: pcb.total_cpu_time,
                state: pcb.state,
                completion_time: completion,
                turnaround,
                waiting: turnaround - pcb.total_cpu_time,
                response: pcb.response_time.unwrap_or(0),
            })
        })
        .collect()
}
