//! Dispatch ordering policies.
//!
//! The policy set is closed: each policy fixes the queue's comparison
//! direction and how a task's ordering key is derived at admission.
//!
//! | policy | queue mode | ordering key |
//! |--------|-----------|--------------|
//! | highest-priority-first | max-first | `priority` as given |
//! | earliest-deadline-first | min-first | `deadline_ms`, written into `priority` at admission |
//!
//! # Reference
//! Jackson (1955) for EDD optimality on a single machine; Pinedo (2016),
//! Ch. 4: Priority Dispatching

use std::str::FromStr;

use super::engine::SimulationError;
use crate::queue::HeapMode;

/// Ordering policy for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Dispatch the waiting task with the highest `priority`.
    HighestPriorityFirst,
    /// Dispatch the waiting task with the earliest deadline. Every task
    /// must carry a deadline; the simulator rewrites `priority` to the
    /// deadline at admission and stashes the original value.
    EarliestDeadlineFirst,
}

impl DispatchPolicy {
    /// The queue comparison direction this policy requires.
    pub fn heap_mode(&self) -> HeapMode {
        match self {
            Self::HighestPriorityFirst => HeapMode::MaxFirst,
            Self::EarliestDeadlineFirst => HeapMode::MinFirst,
        }
    }

    /// Canonical string form, round-trips through [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighestPriorityFirst => "highest-priority-first",
            Self::EarliestDeadlineFirst => "earliest-deadline-first",
        }
    }
}

impl FromStr for DispatchPolicy {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highest-priority-first" => Ok(Self::HighestPriorityFirst),
            "earliest-deadline-first" => Ok(Self::EarliestDeadlineFirst),
            other => Err(SimulationError::UnknownPolicy(other.to_string())),
        }
    }
}

impl std::fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
