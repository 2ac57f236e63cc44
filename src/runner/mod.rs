//! Offboarding workflow runner.
//!
//! - [`OffboardWorkflow`] - Runs the steps against the remote services
//! - [`OffboardReport`] - Per-step outcomes and the resulting exit code

pub mod report;
pub mod workflow;

pub use report::{
    OffboardReport, Outcome, Step, StepRecord, EXIT_CLEAN, EXIT_FATAL, EXIT_PARTIAL,
};
pub use workflow::{OffboardWorkflow, WorkflowOptions};
