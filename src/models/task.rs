//! Task (schedulable unit) model.
//!
//! A task is the atom of dispatch: a single uninterruptible unit of work
//! with an arrival time, an execution duration, and an ordering priority.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A task to be dispatched.
///
/// The `id` is the task's identity for the lifetime of a queue: the
/// `IndexedHeap` keys its position map on it, and exactly one live task per
/// id may exist inside a queue instance at any time.
///
/// # Time Representation
/// All times are in milliseconds relative to a scheduling epoch (t=0).
/// The consumer defines what t=0 means (e.g., shift start, midnight UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Ordering key for the priority queue (higher = more important under
    /// a max-first queue). Mutable: the earliest-deadline policy overwrites
    /// it with the deadline at admission time.
    pub priority: i64,
    /// Time at which the task becomes eligible for dispatch (ms).
    pub arrival_time_ms: i64,
    /// Latest completion time (ms). `None` = no deadline.
    pub deadline_ms: Option<i64>,
    /// Execution time once dispatched (ms). Must be positive.
    pub duration_ms: i64,
    /// Priority as supplied by the caller, stashed by the simulator before
    /// a policy remaps `priority`. Never read by the queue.
    pub original_priority: Option<i64>,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Task {
    /// Creates a new task with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            priority: 0,
            arrival_time_ms: 0,
            deadline_ms: None,
            duration_ms: 0,
            original_priority: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the ordering priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the arrival time (ms).
    pub fn with_arrival_time(mut self, arrival_ms: i64) -> Self {
        self.arrival_time_ms = arrival_ms;
        self
    }

    /// Sets the deadline (latest completion time in ms).
    pub fn with_deadline(mut self, deadline_ms: i64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    /// Sets the execution duration (ms).
    pub fn with_duration(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether this task carries a deadline.
    pub fn has_deadline(&self) -> bool {
        self.deadline_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("T1")
            .with_name("Ingest batch")
            .with_priority(10)
            .with_arrival_time(500)
            .with_deadline(100_000)
            .with_duration(3000)
            .with_attribute("customer", "ACME");

        assert_eq!(task.id, "T1");
        assert_eq!(task.name, "Ingest batch");
        assert_eq!(task.priority, 10);
        assert_eq!(task.arrival_time_ms, 500);
        assert_eq!(task.deadline_ms, Some(100_000));
        assert_eq!(task.duration_ms, 3000);
        assert_eq!(task.original_priority, None);
        assert_eq!(task.attributes.get("customer"), Some(&"ACME".to_string()));
    }

    #[test]
    fn test_task_defaults() {
        let task = Task::new("bare");
        assert_eq!(task.priority, 0);
        assert_eq!(task.arrival_time_ms, 0);
        assert_eq!(task.duration_ms, 0);
        assert!(!task.has_deadline());
    }

    #[test]
    fn test_task_serde_round_trip() {
        let task = Task::new("T1")
            .with_priority(7)
            .with_arrival_time(1000)
            .with_deadline(9000)
            .with_duration(2000);

        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
