//! Unique identifiers for simulated entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// User-visible identifier for a simulated process
///
/// Pids are small positive integers chosen by the workload author. They are
/// preserved verbatim through a run and appear in every timeline entry,
/// transition record and metric row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(u32);

impl Pid {
    /// Creates a pid from its user-visible number
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the user-visible number
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
