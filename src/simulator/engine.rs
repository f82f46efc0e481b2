//! Single-server dispatch simulation engine.
//!
//! # Algorithm
//!
//! 1. Copy the input tasks and stable-sort them by arrival time.
//! 2. Admit every task whose arrival time has passed into the queue
//!    (remapping the ordering key for earliest-deadline-first).
//! 3. If the queue is empty but arrivals remain, jump the clock to the
//!    next arrival; otherwise extract the best task and run it to
//!    completion, advancing the clock by its duration.
//! 4. Repeat until no arrivals remain and the queue is drained.
//!
//! Admission of everything already arrived strictly precedes each dispatch
//! decision, so a later-arriving high-priority task contends with tasks
//! that have been waiting.
//!
//! # Complexity
//! O(n log n) over n input tasks: one sort plus one insert and one extract
//! per task.

use crate::models::Task;
use crate::queue::{IndexedHeap, QueueError};

use super::policy::DispatchPolicy;
use super::report::{DispatchRecord, SimulationReport};

/// Errors raised by a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// A policy string did not name a known policy.
    UnknownPolicy(String),
    /// Earliest-deadline-first was selected and a task carries no deadline.
    MissingDeadline(String),
    /// The underlying priority queue rejected an operation.
    Queue(QueueError),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPolicy(s) => write!(
                f,
                "unknown dispatch policy '{s}' (expected 'highest-priority-first' or 'earliest-deadline-first')"
            ),
            Self::MissingDeadline(id) => write!(
                f,
                "earliest-deadline-first requires a deadline: task '{id}' has none"
            ),
            Self::Queue(e) => write!(f, "queue error: {e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Queue(e) => Some(e),
            _ => None,
        }
    }
}

impl From<QueueError> for SimulationError {
    fn from(e: QueueError) -> Self {
        Self::Queue(e)
    }
}

/// Non-preemptive single-server dispatch simulator.
///
/// # Example
///
/// ```
/// use u_dispatch::models::Task;
/// use u_dispatch::simulator::{DispatchPolicy, Simulator};
///
/// let tasks = vec![
///     Task::new("A").with_priority(5).with_arrival_time(0).with_duration(3),
///     Task::new("B").with_priority(9).with_arrival_time(1).with_duration(2),
/// ];
/// let report = Simulator::new(DispatchPolicy::HighestPriorityFirst)
///     .run(&tasks)
///     .unwrap();
/// assert_eq!(report.completed_ids(), vec!["A", "B"]);
/// assert_eq!(report.total_time_ms, 5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    policy: DispatchPolicy,
}

impl Simulator {
    /// Creates a simulator for the given policy.
    pub fn new(policy: DispatchPolicy) -> Self {
        Self { policy }
    }

    /// The policy this simulator dispatches under.
    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Runs the simulation to completion over a batch of tasks.
    ///
    /// Input tasks are copied at admission; the caller's records are never
    /// mutated, so independent runs may share one input slice.
    ///
    /// # Errors
    /// [`SimulationError::MissingDeadline`] if the policy is
    /// earliest-deadline-first and a task has no deadline;
    /// [`SimulationError::Queue`] if admission violates the queue contract
    /// (e.g. duplicate task ids in the input).
    pub fn run(&self, tasks: &[Task]) -> Result<SimulationReport, SimulationError> {
        let mut arrivals: Vec<Task> = tasks.to_vec();
        arrivals.sort_by_key(|t| t.arrival_time_ms);

        let mut queue = IndexedHeap::with_capacity(self.policy.heap_mode(), arrivals.len());
        let mut pending = arrivals.into_iter().peekable();
        let mut records: Vec<DispatchRecord> = Vec::with_capacity(tasks.len());
        let mut clock: i64 = 0;

        loop {
            // Admit everything that has arrived by the current clock.
            while pending
                .peek()
                .is_some_and(|t| t.arrival_time_ms <= clock)
            {
                if let Some(task) = pending.next() {
                    self.admit(task, &mut queue)?;
                }
            }

            if queue.is_empty() {
                match pending.peek() {
                    // Nothing runnable: the clock jumps to the next arrival.
                    Some(next) => {
                        clock = next.arrival_time_ms;
                        continue;
                    }
                    None => break,
                }
            }

            let task = queue.extract_best()?;
            let start_ms = clock;
            clock += task.duration_ms;
            let missed_deadline = task.deadline_ms.is_some_and(|d| clock > d);
            records.push(DispatchRecord {
                start_ms,
                finish_ms: clock,
                wait_ms: start_ms - task.arrival_time_ms,
                missed_deadline,
                task,
            });
        }

        Ok(SimulationReport::calculate(records, clock))
    }

    /// Inserts one arrived task, applying the policy's key remap first.
    fn admit(&self, mut task: Task, queue: &mut IndexedHeap) -> Result<(), SimulationError> {
        if self.policy == DispatchPolicy::EarliestDeadlineFirst {
            let deadline = match task.deadline_ms {
                Some(d) => d,
                None => return Err(SimulationError::MissingDeadline(task.id)),
            };
            task.original_priority = Some(task.priority);
            task.priority = deadline;
        }
        queue.insert(task)?;
        Ok(())
    }
}

/// Runs one simulation: the single entry point for batch dispatch.
pub fn simulate(tasks: &[Task], policy: DispatchPolicy) -> Result<SimulationReport, SimulationError> {
    Simulator::new(policy).run(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, priority: i64, arrival_ms: i64, duration_ms: i64) -> Task {
        Task::new(id)
            .with_priority(priority)
            .with_arrival_time(arrival_ms)
            .with_duration(duration_ms)
    }

    /// The four-task batch from the scheduling walkthrough:
    /// A(prio 5, arr 0, dur 3), B(1, 1, 2), C(10, 2, 4), D(7, 6, 3).
    fn walkthrough_tasks(with_deadlines: bool) -> Vec<Task> {
        let mut tasks = vec![
            make_task("A", 5, 0, 3),
            make_task("B", 1, 1, 2),
            make_task("C", 10, 2, 4),
            make_task("D", 7, 6, 3),
        ];
        if with_deadlines {
            for (task, deadline) in tasks.iter_mut().zip([8, 7, 12, 14]) {
                task.deadline_ms = Some(deadline);
            }
        }
        tasks
    }

    #[test]
    fn test_highest_priority_first_order() {
        let report = simulate(
            &walkthrough_tasks(false),
            DispatchPolicy::HighestPriorityFirst,
        )
        .unwrap();

        // A runs alone 0→3; at 3 C (10) beats B (1); D arrives mid-C and
        // beats B at 7; B drains last.
        assert_eq!(report.completed_ids(), vec!["A", "C", "D", "B"]);
        assert_eq!(report.total_time_ms, 12);
        assert_eq!(report.missed_deadline_count, 0);
        assert!((report.average_wait_ms - 2.75).abs() < 1e-10);
    }

    #[test]
    fn test_earliest_deadline_first_order() {
        let report = simulate(
            &walkthrough_tasks(true),
            DispatchPolicy::EarliestDeadlineFirst,
        )
        .unwrap();

        // A 0→3; B (deadline 7) beats C (12) at clock 3; C 5→9; D 9→12.
        assert_eq!(report.completed_ids(), vec!["A", "B", "C", "D"]);
        assert_eq!(report.total_time_ms, 12);
        assert_eq!(report.missed_deadline_count, 0);
        assert!((report.average_wait_ms - 2.0).abs() < 1e-10);
        assert!((report.on_time_rate() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_edf_remap_stashes_original_priority() {
        let report = simulate(
            &walkthrough_tasks(true),
            DispatchPolicy::EarliestDeadlineFirst,
        )
        .unwrap();

        let b = &report.completed[1];
        assert_eq!(b.task.id, "B");
        assert_eq!(b.task.priority, 7); // deadline took over the key
        assert_eq!(b.task.original_priority, Some(1));
    }

    #[test]
    fn test_copy_on_admit_leaves_input_untouched() {
        let tasks = walkthrough_tasks(true);
        let before = tasks.clone();

        simulate(&tasks, DispatchPolicy::EarliestDeadlineFirst).unwrap();
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_deadline_misses_are_counted() {
        // Both arrive at 0 with deadline 4; whichever runs second finishes
        // at 6 and misses.
        let tasks = vec![
            make_task("A", 5, 0, 3).with_deadline(4),
            make_task("B", 9, 0, 3).with_deadline(4),
        ];

        let report = simulate(&tasks, DispatchPolicy::HighestPriorityFirst).unwrap();
        assert_eq!(report.completed_ids(), vec!["B", "A"]);
        assert_eq!(report.missed_deadline_count, 1);
        assert!(report.completed[1].missed_deadline);
        assert!(!report.completed[0].missed_deadline);
        assert!((report.on_time_rate() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_clock_jumps_over_idle_gap() {
        let tasks = vec![make_task("A", 1, 0, 1), make_task("B", 1, 10, 2)];

        let report = simulate(&tasks, DispatchPolicy::HighestPriorityFirst).unwrap();
        let b = &report.completed[1];
        // No time is spent idle: the clock jumps from 1 to 10.
        assert_eq!(b.start_ms, 10);
        assert_eq!(b.wait_ms, 0);
        assert_eq!(report.total_time_ms, 12);
    }

    #[test]
    fn test_late_arrival_contends_with_waiting_tasks() {
        // B arrives while A runs and must still lose to the even later,
        // higher-priority C admitted at the same dispatch decision.
        let tasks = vec![
            make_task("A", 5, 0, 4),
            make_task("B", 3, 1, 1),
            make_task("C", 8, 4, 1),
        ];

        let report = simulate(&tasks, DispatchPolicy::HighestPriorityFirst).unwrap();
        assert_eq!(report.completed_ids(), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_waits_are_non_negative() {
        let report = simulate(
            &walkthrough_tasks(false),
            DispatchPolicy::HighestPriorityFirst,
        )
        .unwrap();
        assert!(report.completed.iter().all(|r| r.wait_ms >= 0));
    }

    #[test]
    fn test_edf_requires_deadlines() {
        let tasks = vec![make_task("A", 5, 0, 3)];

        let err = simulate(&tasks, DispatchPolicy::EarliestDeadlineFirst).unwrap_err();
        assert_eq!(err, SimulationError::MissingDeadline("A".to_string()));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let tasks = vec![make_task("A", 5, 0, 3), make_task("A", 1, 0, 2)];

        let err = simulate(&tasks, DispatchPolicy::HighestPriorityFirst).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Queue(QueueError::DuplicateId("A".to_string()))
        );
    }

    #[test]
    fn test_empty_input() {
        let report = simulate(&[], DispatchPolicy::HighestPriorityFirst).unwrap();
        assert_eq!(report.dispatch_count(), 0);
        assert_eq!(report.total_time_ms, 0);
        assert!((report.average_wait_ms - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_task() {
        let tasks = vec![make_task("only", 1, 5, 7).with_deadline(20)];

        let report = simulate(&tasks, DispatchPolicy::EarliestDeadlineFirst).unwrap();
        assert_eq!(report.completed_ids(), vec!["only"]);
        assert_eq!(report.completed[0].start_ms, 5);
        assert_eq!(report.completed[0].finish_ms, 12);
        assert_eq!(report.total_time_ms, 12);
        assert_eq!(report.missed_deadline_count, 0);
    }
}
