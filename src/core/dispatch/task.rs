//! Task trait and payload

use crate::core::command::CommandTaskContext;
use crate::domain::Result;
use async_trait::async_trait;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased task payload
#[derive(Clone)]
pub struct TaskPayload(Arc<dyn Any + Send + Sync>);

impl TaskPayload {
    /// Wrap a value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Whether the payload holds a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_ref().is::<T>()
    }

    /// Borrow the payload as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().downcast_ref::<T>()
    }
}

impl fmt::Debug for TaskPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TaskPayload(..)")
    }
}

/// A unit of background work
#[async_trait]
pub trait CommandTask: Send + Sync {
    /// Name this task is submitted under
    fn name(&self) -> &str;

    /// Whether the payload has the shape this task expects
    fn accepts_payload(&self, payload: &TaskPayload) -> bool;

    /// Whether this task handles the submission
    ///
    /// Must not have side effects. The name is matched case-insensitively.
    fn can_handle(&self, name: &str, payload: &TaskPayload) -> bool {
        name.eq_ignore_ascii_case(self.name()) && self.accepts_payload(payload)
    }

    /// Run the task
    async fn execute(&self, context: &mut CommandTaskContext) -> Result<()>;
}
