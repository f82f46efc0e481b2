//! Discrete-event dispatch simulation.
//!
//! Simulates a single, non-preemptive server dispatching a batch of tasks
//! under a selectable ordering policy, driven by an
//! [`IndexedHeap`](crate::queue::IndexedHeap). The run advances a simulated
//! clock through
//! arrival, dispatch, and completion events and produces an immutable
//! [`SimulationReport`] with the dispatch order, deadline-miss count, total
//! elapsed time, and average wait.
//!
//! # Determinism
//!
//! A run is a pure function of `(tasks, policy)`: input tasks are copied at
//! admission, so the caller's records are never mutated and independent
//! concurrent runs over a shared slice cannot interfere.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3
//! - Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a
//!   Hard-Real-Time Environment"

mod engine;
mod policy;
mod report;

pub use engine::{simulate, SimulationError, Simulator};
pub use policy::DispatchPolicy;
pub use report::{DispatchRecord, SimulationReport};
