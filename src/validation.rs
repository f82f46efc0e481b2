//! Input validation for dispatch batches.
//!
//! Checks structural integrity of a task batch before simulation or
//! queueing. Detects:
//! - Duplicate task IDs
//! - Non-positive durations
//! - Deadlines that cannot be met even with zero wait
//!
//! Standalone by design: the simulator does not call this implicitly, so
//! callers choose whether a doomed-but-legal batch (an unmeetable deadline
//! simply counts as a miss) is worth rejecting up front.

use std::collections::HashSet;

use crate::models::Task;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// A task's duration is zero or negative.
    NonPositiveDuration,
    /// A task's deadline falls before its arrival plus duration.
    UnmeetableDeadline,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a task batch.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. Every duration is positive
/// 3. Every deadline is reachable with zero wait
///    (`arrival + duration <= deadline`)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if task.duration_ms <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!(
                    "Task '{}' has non-positive duration {}ms",
                    task.id, task.duration_ms
                ),
            ));
        }

        if let Some(deadline) = task.deadline_ms {
            if task.arrival_time_ms + task.duration_ms > deadline {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnmeetableDeadline,
                    format!(
                        "Task '{}' cannot meet deadline {}ms (arrives {}ms, runs {}ms)",
                        task.id, deadline, task.arrival_time_ms, task.duration_ms
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, arrival_ms: i64, duration_ms: i64) -> Task {
        Task::new(id)
            .with_arrival_time(arrival_ms)
            .with_duration(duration_ms)
    }

    #[test]
    fn test_valid_batch() {
        let tasks = vec![
            make_task("A", 0, 1000).with_deadline(5000),
            make_task("B", 500, 2000),
        ];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![make_task("A", 0, 1000), make_task("A", 100, 2000)];

        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_non_positive_duration() {
        let tasks = vec![make_task("zero", 0, 0), make_task("negative", 0, -5)];

        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveDuration)
                .count(),
            2
        );
    }

    #[test]
    fn test_unmeetable_deadline() {
        // Arrives at 1000, runs 3000 → earliest finish 4000, deadline 2000.
        let tasks = vec![make_task("late", 1000, 3000).with_deadline(2000)];

        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnmeetableDeadline));
    }

    #[test]
    fn test_deadline_exactly_reachable() {
        let tasks = vec![make_task("tight", 1000, 3000).with_deadline(4000)];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let tasks = vec![
            make_task("A", 0, 0),
            make_task("A", 0, 1000).with_deadline(500),
        ];

        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_empty_batch() {
        assert!(validate_tasks(&[]).is_ok());
    }
}
