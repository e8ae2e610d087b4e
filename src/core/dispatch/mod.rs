//! Job dispatch
//!
//! Tasks register with a [`TaskDispatcher`]; a submission carries a name and
//! an opaque [`TaskPayload`] and is executed by the first registered task that
//! accepts both.

pub mod dispatcher;
pub mod task;

pub use dispatcher::{TaskDispatcher, TaskOutcome};
pub use task::{CommandTask, TaskPayload};
