//! Dispatch domain models.
//!
//! Provides the schedulable-unit type shared by the priority queue and the
//! simulator. Domain-agnostic within dispatching — applicable to CPU-style
//! task queues, job intake pipelines, and ticket triage alike.
//!
//! # Domain Mappings
//!
//! | u-dispatch | Operating System | Manufacturing | Support Desk |
//! |------------|-----------------|---------------|--------------|
//! | Task | Process/Job | Work Order | Ticket |
//! | priority | Nice value (inverted) | Order importance | Severity |
//! | deadline | Real-time deadline | Due date | SLA expiry |

mod task;

pub use task::Task;
