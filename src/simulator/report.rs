//! Simulation result records.
//!
//! A finished run yields a [`SimulationReport`]: the dispatch order with
//! per-task timing, the deadline-miss count, the final clock value, and the
//! mean wait. Derived quality metrics follow the standard single-machine
//! performance measures.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// One dispatched task with its simulated timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// The task as it left the queue. Under earliest-deadline-first its
    /// `priority` holds the deadline and `original_priority` the
    /// caller-supplied value.
    pub task: Task,
    /// Time dispatch began (ms).
    pub start_ms: i64,
    /// Time execution finished (ms).
    pub finish_ms: i64,
    /// Time spent waiting between arrival and dispatch (ms). Non-negative:
    /// a task is never dispatched before it arrives.
    pub wait_ms: i64,
    /// Whether `finish_ms` exceeded the task's deadline.
    pub missed_deadline: bool,
}

impl DispatchRecord {
    /// Turnaround: arrival to completion (ms).
    #[inline]
    pub fn turnaround_ms(&self) -> i64 {
        self.finish_ms - self.task.arrival_time_ms
    }
}

/// Immutable result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Dispatched tasks in dispatch order.
    pub completed: Vec<DispatchRecord>,
    /// Number of tasks whose finish time exceeded their deadline.
    pub missed_deadline_count: usize,
    /// Final clock value (ms).
    pub total_time_ms: i64,
    /// Mean wait across all dispatches, `0.0` when none.
    pub average_wait_ms: f64,
}

impl SimulationReport {
    /// Builds a report from the dispatch records of a finished run.
    pub fn calculate(completed: Vec<DispatchRecord>, total_time_ms: i64) -> Self {
        let missed_deadline_count = completed.iter().filter(|r| r.missed_deadline).count();
        let average_wait_ms = if completed.is_empty() {
            0.0
        } else {
            let total: i64 = completed.iter().map(|r| r.wait_ms).sum();
            total as f64 / completed.len() as f64
        };

        Self {
            completed,
            missed_deadline_count,
            total_time_ms,
            average_wait_ms,
        }
    }

    /// Task ids in dispatch order.
    pub fn completed_ids(&self) -> Vec<&str> {
        self.completed.iter().map(|r| r.task.id.as_str()).collect()
    }

    /// Number of dispatched tasks.
    pub fn dispatch_count(&self) -> usize {
        self.completed.len()
    }

    /// Largest single wait (ms), 0 when nothing was dispatched.
    pub fn max_wait_ms(&self) -> i64 {
        self.completed.iter().map(|r| r.wait_ms).max().unwrap_or(0)
    }

    /// Fraction of tasks finishing on time (0.0..1.0). Tasks without a
    /// deadline count as on time; an empty run counts as 1.0.
    pub fn on_time_rate(&self) -> f64 {
        if self.completed.is_empty() {
            return 1.0;
        }
        let on_time = self.completed.len() - self.missed_deadline_count;
        on_time as f64 / self.completed.len() as f64
    }
}
