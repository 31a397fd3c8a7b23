//! Test utilities
//!
//! Workload builders and timeline helpers shared by tests across the
//! workspace. Deliberately small: real assertions live next to the modules
//! they exercise.

use crate::engine::{EngineOutput, SimulationEngine};
use crate::pcb::ProcessControlBlock;
use crate::timeline::{RawSlot, SlotKind};
use core_types::{Discipline, ProcessSpec, SimConfig, Tick};

/// Builds PCBs for a slice of workload records
pub fn build_pcbs(specs: &[ProcessSpec]) -> Vec<ProcessControlBlock> {
    specs.iter().map(ProcessControlBlock::from_spec).collect()
}

/// Runs one discipline over `specs` and unwraps the output
///
/// Panics on an engine error; tests that exercise error paths construct the
/// engine themselves.
pub fn run_engine(discipline: Discipline, config: SimConfig, specs: &[ProcessSpec]) -> EngineOutput {
    match SimulationEngine::new(discipline, config, build_pcbs(specs)).run() {
        Ok(output) => output,
        Err(error) => panic!("engine failed: {}", error),
    }
}

/// Coalesces the PROCESS slots of a raw timeline into `(pid, start, end)`
/// spans with half-open bounds
pub fn process_spans(raw: &[RawSlot]) -> Vec<(u32, Tick, Tick)> {
    let mut spans: Vec<(u32, Tick, Tick)> = Vec::new();
    for slot in raw {
        if slot.kind != SlotKind::Process {
            continue;
        }
        let Some(pid) = slot.pid else { continue };
        match spans.last_mut() {
            Some((last_pid, _, end)) if *last_pid == pid.as_u32() && *end == slot.tick => {
                *end += 1;
            }
            _ => spans.push((pid.as_u32(), slot.tick, slot.tick + 1)),
        }
    }
    spans
}
