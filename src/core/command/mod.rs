//! Command execution context
//!
//! - [`workspace`] - Per-job scratch directory, removed when the job ends
//! - [`runner`] - Runs conversion commands as child processes
//! - [`context`] - Everything a task sees while it executes

pub mod context;
pub mod runner;
pub mod workspace;

pub use context::CommandTaskContext;
pub use runner::{CommandRunner, ProcessRunner};
pub use workspace::Workspace;
