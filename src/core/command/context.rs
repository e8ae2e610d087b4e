//! Task execution context

use crate::core::command::runner::CommandRunner;
use crate::core::dataset::CommandInfo;
use crate::core::dispatch::TaskPayload;
use crate::domain::{BundleError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// State handed to a task for one execution
///
/// The workspace belongs to this execution alone; the dispatcher removes it
/// after the task returns.
pub struct CommandTaskContext {
    job_id: Uuid,
    task_name: String,
    workspace: PathBuf,
    payload: TaskPayload,
    runner: Arc<dyn CommandRunner + Send + Sync>,
    shutdown: watch::Receiver<bool>,
}

impl CommandTaskContext {
    /// Create a context
    pub fn new(
        job_id: Uuid,
        task_name: impl Into<String>,
        workspace: impl Into<PathBuf>,
        payload: TaskPayload,
        runner: Arc<dyn CommandRunner + Send + Sync>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            job_id,
            task_name: task_name.into(),
            workspace: workspace.into(),
            payload,
            runner,
            shutdown,
        }
    }

    /// Workspace directory of this execution
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// The submitted payload
    pub fn payload(&self) -> &TaskPayload {
        &self.payload
    }

    /// Whether shutdown was requested
    pub fn is_cancelled(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Fails with `BundleError::Cancelled` once shutdown was requested
    pub fn ensure_not_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            tracing::warn!(
                job_id = %self.job_id,
                task = %self.task_name,
                "Shutdown requested, stopping job"
            );
            return Err(BundleError::Cancelled);
        }
        Ok(())
    }

    /// Create (if needed) a directory inside the workspace and return its path
    pub async fn create_directory(&self, name: &str) -> Result<PathBuf> {
        let path = self.workspace.join(name);
        tokio::fs::create_dir_all(&path).await.map_err(|e| {
            BundleError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;
        Ok(path)
    }

    /// Run a command inside the workspace and return its exit code
    pub async fn run_command(&self, command: &CommandInfo) -> Result<i32> {
        self.runner.run(command, &self.workspace).await
    }
}

impl std::fmt::Debug for CommandTaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTaskContext")
            .field("job_id", &self.job_id)
            .field("task_name", &self.task_name)
            .field("workspace", &self.workspace)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::ProcessRunner;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cancellation_is_observed() {
        let workspace = TempDir::new().unwrap();
        let (tx, rx) = watch::channel(false);
        let context = CommandTaskContext::new(
            Uuid::new_v4(),
            "TEST",
            workspace.path(),
            TaskPayload::new(()),
            Arc::new(ProcessRunner),
            rx,
        );

        assert!(context.ensure_not_cancelled().is_ok());
        tx.send(true).unwrap();
        assert!(matches!(
            context.ensure_not_cancelled(),
            Err(BundleError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_create_directory() {
        let workspace = TempDir::new().unwrap();
        let (_tx, rx) = watch::channel(false);
        let context = CommandTaskContext::new(
            Uuid::new_v4(),
            "TEST",
            workspace.path(),
            TaskPayload::new(()),
            Arc::new(ProcessRunner),
            rx,
        );

        let path = context.create_directory("MVT").await.unwrap();
        assert_eq!(path, workspace.path().join("MVT"));
        assert!(path.is_dir());
        context.create_directory("MVT").await.unwrap();
    }
}
