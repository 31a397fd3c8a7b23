//! # Orchestrator
//!
//! The entry point the hosting application calls: validate a workload, run
//! one discipline end-to-end, or run several disciplines over independent
//! clones of the same workload for comparison.
//!
//! ## Contract
//!
//! Total on valid input: every call returns a [`RunResult`] or a typed
//! [`SimError`]. The caller's workload is never mutated — each run builds
//! its own process population from the specs. Runs share no state, so the
//! comparison mapping is safe to build in any order.

pub mod result;
pub mod validate;

pub use result::{RunId, RunResult};
pub use validate::validate;

use core_types::{Discipline, ProcessSpec, SimConfig, SimError};
use log::debug;
use sim_engine::{ProcessControlBlock, SimulationEngine};
use sim_metrics::{consolidate, derive_metrics, snapshot_processes};
use std::collections::BTreeMap;

/// Runs one discipline over the workload
pub fn run_once(
    workload: &[ProcessSpec],
    discipline: Discipline,
    config: &SimConfig,
) -> Result<RunResult, SimError> {
    validate(workload, config)?;
    debug!("orchestrating {} over {} processes", discipline, workload.len());

    let pcbs: Vec<ProcessControlBlock> =
        workload.iter().map(ProcessControlBlock::from_spec).collect();
    let output = SimulationEngine::new(discipline, config.clone(), pcbs).run()?;

    let timeline = consolidate(&output.raw_timeline);
    let metrics = derive_metrics(&output);
    let processes = snapshot_processes(&output);

    Ok(RunResult {
        id: RunId::new(),
        discipline,
        raw_timeline: output.raw_timeline,
        timeline,
        transitions: output.transitions,
        processes,
        metrics,
    })
}

/// Resolves a discipline by its user-visible name, then runs it
pub fn run_named(
    workload: &[ProcessSpec],
    discipline: &str,
    config: &SimConfig,
) -> Result<RunResult, SimError> {
    let discipline: Discipline = discipline.parse()?;
    run_once(workload, discipline, config)
}

/// Runs each discipline over an independent clone of the workload
///
/// The mapping is keyed by discipline; no state crosses runs, and a failure
/// in any run aborts the comparison.
pub fn compare_many(
    workload: &[ProcessSpec],
    disciplines: &[Discipline],
    config: &SimConfig,
) -> Result<BTreeMap<Discipline, RunResult>, SimError> {
    let mut results = BTreeMap::new();
    for &discipline in disciplines {
        results.insert(discipline, run_once(workload, discipline, config)?);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Pid;

    fn reference_workload() -> Vec<ProcessSpec> {
        vec![
            ProcessSpec::new(1, 0, 5),
            ProcessSpec::new(2, 1, 3),
            ProcessSpec::new(3, 2, 1),
        ]
    }

    #[test]
    fn test_run_once_produces_reference_metrics() {
        let result = run_once(
            &reference_workload(),
            Discipline::Fcfs,
            &SimConfig::without_context_switch(),
        )
        .unwrap();
        assert_eq!(result.discipline, Discipline::Fcfs);
        assert_eq!(result.metrics.avg_turnaround, 19.0 / 3.0);
        assert_eq!(result.metrics.avg_waiting, 10.0 / 3.0);
        assert_eq!(result.raw_timeline.len(), 9);
        assert_eq!(result.timeline.len(), 3);
        assert_eq!(result.processes.len(), 3);
    }

    #[test]
    fn test_run_once_rejects_invalid_input_before_running() {
        let err = run_once(&[], Discipline::Fcfs, &SimConfig::default()).unwrap_err();
        assert!(matches!(err, SimError::InvalidWorkload { .. }));
    }

    #[test]
    fn test_run_named_resolves_disciplines() {
        let result = run_named(&reference_workload(), "fcfs", &SimConfig::default()).unwrap();
        assert_eq!(result.discipline, Discipline::Fcfs);

        let err = run_named(&reference_workload(), "LOTTERY", &SimConfig::default()).unwrap_err();
        assert_eq!(err, SimError::UnknownDiscipline("LOTTERY".to_string()));
    }

    #[test]
    fn test_workload_is_not_mutated() {
        let workload = reference_workload();
        let before = workload.clone();
        run_once(&workload, Discipline::RoundRobin, &SimConfig::default()).unwrap();
        assert_eq!(workload, before);
    }

    #[test]
    fn test_identical_runs_differ_only_in_id() {
        let workload = reference_workload();
        let config = SimConfig::default();
        let first = run_once(&workload, Discipline::Srtf, &config).unwrap();
        let second = run_once(&workload, Discipline::Srtf, &config).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.raw_timeline, second.raw_timeline);
        assert_eq!(first.timeline, second.timeline);
        assert_eq!(first.transitions, second.transitions);
        assert_eq!(first.processes, second.processes);
        assert_eq!(first.metrics, second.metrics);
    }

    #[test]
    fn test_compare_many_runs_every_discipline() {
        let results = compare_many(
            &reference_workload(),
            &Discipline::ALL,
            &SimConfig::default(),
        )
        .unwrap();
        assert_eq!(results.len(), Discipline::ALL.len());
        for (discipline, result) in &results {
            assert_eq!(*discipline, result.discipline);
            assert_eq!(result.processes.len(), 3);
        }
    }

    #[test]
    fn test_compare_many_runs_are_independent() {
        let workload = reference_workload();
        let config = SimConfig::without_context_switch();
        let combined = compare_many(&workload, &[Discipline::Fcfs, Discipline::Sjf], &config)
            .unwrap();
        let alone = run_once(&workload, Discipline::Sjf, &config).unwrap();
        assert_eq!(combined[&Discipline::Sjf].raw_timeline, alone.raw_timeline);
        assert_eq!(combined[&Discipline::Sjf].metrics, alone.metrics);
    }

    #[test]
    fn test_iteration_cap_surfaces_to_the_caller() {
        let workload = [ProcessSpec::new(1, 0, sim_engine::MAX_TICKS + 1)];
        let err = run_once(&workload, Discipline::Fcfs, &SimConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SimError::IterationCapExceeded {
                cap: sim_engine::MAX_TICKS
            }
        );
    }

    #[test]
    fn test_result_serializes_with_contract_field_names() {
        let result = run_once(
            &[ProcessSpec::new(1, 0, 2)],
            Discipline::Fcfs,
            &SimConfig::without_context_switch(),
        )
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "id",
            "discipline",
            "rawTimeline",
            "timeline",
            "transitions",
            "processes",
            "metrics",
        ] {
            assert!(object.contains_key(key), "missing {}", key);
        }
        assert_eq!(json["discipline"], "FCFS");
        assert_eq!(json["rawTimeline"][0]["type"], "PROCESS");
        assert_eq!(json["rawTimeline"][0]["pid"], 1);
        assert_eq!(json["timeline"][0]["startTime"], 0);
        assert_eq!(json["transitions"][0]["from"], "NEW");
        assert_eq!(json["transitions"][0]["to"], "READY");
        assert_eq!(json["processes"][0]["completionTime"], 2);
        assert_eq!(json["metrics"]["avgTurnaround"], 2.0);
    }

    #[test]
    fn test_transition_audit_for_a_full_run() {
        let result = run_once(
            &[ProcessSpec::new(1, 0, 2), ProcessSpec::new(2, 0, 2)],
            Discipline::Fcfs,
            &SimConfig::without_context_switch(),
        )
        .unwrap();
        let p1: Vec<_> = result
            .transitions
            .iter()
            .filter(|t| t.pid == Pid::new(1))
            .map(|t| (t.from, t.to, t.time))
            .collect();
        use core_types::ProcessState::*;
        assert_eq!(
            p1,
            vec![(New, Ready, 0), (Ready, Running, 0), (Running, Terminated, 2)]
        );
    }
}
