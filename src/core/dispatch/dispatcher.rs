//! Task dispatcher

use crate::config::WorkspaceConfig;
use crate::core::command::{CommandRunner, CommandTaskContext, Workspace};
use crate::core::dispatch::task::{CommandTask, TaskPayload};
use crate::domain::{BundleError, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    /// Name of the task that ran
    pub task: String,
    /// Identifier of the execution, also the workspace directory name
    pub job_id: Uuid,
    /// Wall time of the execution
    pub duration: Duration,
}

/// Routes submissions to registered tasks
///
/// Tasks are consulted in registration order and the first one whose
/// `can_handle` returns true runs.
pub struct TaskDispatcher {
    tasks: Vec<Arc<dyn CommandTask + Send + Sync>>,
    runner: Arc<dyn CommandRunner + Send + Sync>,
    workspace: WorkspaceConfig,
    shutdown: watch::Receiver<bool>,
}

impl TaskDispatcher {
    /// Create a dispatcher with no tasks
    pub fn new(
        runner: Arc<dyn CommandRunner + Send + Sync>,
        workspace: WorkspaceConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            tasks: Vec::new(),
            runner,
            workspace,
            shutdown,
        }
    }

    /// Register a task
    pub fn register(&mut self, task: Arc<dyn CommandTask + Send + Sync>) -> &mut Self {
        tracing::debug!(task = task.name(), "Registered task");
        self.tasks.push(task);
        self
    }

    /// Number of registered tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Run the first task accepting `name` and `payload`
    ///
    /// A fresh workspace is created for the execution and removed afterwards,
    /// whether the task succeeds or fails.
    ///
    /// # Errors
    ///
    /// Returns `BundleError::UnhandledTask` if no task accepts the submission,
    /// otherwise whatever the task returns.
    pub async fn submit(&self, name: &str, payload: TaskPayload) -> Result<TaskOutcome> {
        let task = self
            .tasks
            .iter()
            .find(|task| task.can_handle(name, &payload))
            .cloned()
            .ok_or_else(|| {
                tracing::warn!(task = name, "No task accepts submission");
                BundleError::UnhandledTask {
                    name: name.to_string(),
                }
            })?;

        let job_id = Uuid::new_v4();
        let span = tracing::info_span!("task", task = %task.name(), job_id = %job_id);

        async move {
            let start = Instant::now();
            let workspace =
                Workspace::create(&self.workspace.root, job_id, self.workspace.keep_workspace)
                    .await?;

            let mut context = CommandTaskContext::new(
                job_id,
                name,
                workspace.path(),
                payload,
                self.runner.clone(),
                self.shutdown.clone(),
            );

            tracing::debug!(workspace = %workspace.path().display(), "Executing task");
            let result = task.execute(&mut context).await;
            workspace.close().await;

            let duration = start.elapsed();
            match result {
                Ok(()) => {
                    tracing::info!(duration_ms = duration.as_millis() as u64, "Task completed");
                    Ok(TaskOutcome {
                        task: task.name().to_string(),
                        job_id,
                        duration,
                    })
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        duration_ms = duration.as_millis() as u64,
                        "Task failed"
                    );
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }
}
