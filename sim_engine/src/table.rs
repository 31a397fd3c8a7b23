//! Engine-owned process storage
//!
//! PCBs live in one vector for the whole run; every queue carries plain
//! [`Pid`] handles and resolves them here. The pid map gives O(1) lookup
//! and removes any ownership cycle between queues and PCBs.

use crate::pcb::ProcessControlBlock;
use core_types::Pid;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

/// The process population of one run
#[derive(Debug, Clone)]
pub struct ProcessTable {
    pcbs: Vec<ProcessControlBlock>,
    by_pid: HashMap<Pid, usize>,
}

impl ProcessTable {
    /// Takes ownership of the population for the duration of a run
    pub fn new(pcbs: Vec<ProcessControlBlock>) -> Self {
        let by_pid = pcbs
            .iter()
            .enumerate()
            .map(|(index, pcb)| (pcb.pid, index))
            .collect();
        Self { pcbs, by_pid }
    }

    pub fn len(&self) -> usize {
        self.pcbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pcbs.is_empty()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.by_pid.contains_key(&pid)
    }

    /// Looks up a PCB without committing to its existence
    pub fn get(&self, pid: Pid) -> Option<&ProcessControlBlock> {
        self.by_pid.get(&pid).map(|&index| &self.pcbs[index])
    }

    /// Iterates PCBs in their stored order
    pub fn iter(&self) -> impl Iterator<Item = &ProcessControlBlock> {
        self.pcbs.iter()
    }

    /// Pids sorted by `(arrival, pid)` — the admission order
    pub fn pids_in_arrival_order(&self) -> Vec<Pid> {
        let mut pids: Vec<Pid> = self.pcbs.iter().map(|pcb| pcb.pid).collect();
        pids.sort_by_key(|&pid| (self[pid].arrival_time, pid));
        pids
    }

    /// Consumes the table, returning the PCBs sorted by pid
    pub fn into_pcbs_by_pid(mut self) -> Vec<ProcessControlBlock> {
        self.pcbs.sort_by_key(|pcb| pcb.pid);
        self.pcbs
    }
}

impl Index<Pid> for ProcessTable {
    type Output = ProcessControlBlock;

    fn index(&self, pid: Pid) -> &Self::Output {
        &self.pcbs[self.by_pid[&pid]]
    }
}

impl IndexMut<Pid> for ProcessTable {
    fn index_mut(&mut self, pid: Pid) -> &mut Self::Output {
        &mut self.pcbs[self.by_pid[&pid]]
    }
}
