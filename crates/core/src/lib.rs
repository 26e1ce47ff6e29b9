//! xo-core: Core library for the Experiment Orchestrator (xo)
//!
//! This crate provides:
//! - Pure state machines for worker machines and experiments
//! - The coordinator: registry, ledger, backlog queue, and the
//!   assignment protocol binding the two state machines
//! - Derived status reporting for operator visibility
//!
//! All I/O (HTTP transport, the operator console, result files) lives
//! in the daemon crate; nothing here blocks or touches the filesystem.

pub mod clock;

// State machines (order matters for dependencies)
pub mod machine;
pub mod experiment;
pub mod coordinator;
pub mod report;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use coordinator::{Coordinator, CoordinatorError, WorkOrder};
pub use experiment::{Experiment, ExperimentId, ExperimentStatus};
pub use machine::{Machine, MachineId, MachineStatus};
pub use report::{describe_experiment, describe_machine};
