//! Process execution

use crate::core::dataset::CommandInfo;
use crate::domain::{BundleError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Runs a conversion command and reports its exit code
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` with `workspace` as working directory
    ///
    /// # Errors
    ///
    /// Returns `BundleError::Conversion` if the process cannot be started or awaited.
    /// A non-zero exit code is not an error at this level.
    async fn run(&self, command: &CommandInfo, workspace: &Path) -> Result<i32>;
}

/// Runs commands as child processes, forwarding their output to tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandInfo, workspace: &Path) -> Result<i32> {
        tracing::debug!(command = %command, "Spawning conversion");

        let mut child = Command::new(command.program())
            .args(command.exposed_args())
            .current_dir(workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                BundleError::Conversion(format!("Failed to start {}: {}", command.program(), e))
            })?;

        let stdout = child.stdout.take().map(|out| tokio::spawn(forward(out, false)));
        let stderr = child.stderr.take().map(|err| tokio::spawn(forward(err, true)));

        let status = child.wait().await.map_err(|e| {
            BundleError::Conversion(format!("Failed to wait for {}: {}", command.program(), e))
        })?;

        for reader in [stdout, stderr].into_iter().flatten() {
            let _ = reader.await;
        }

        let code = status.code().unwrap_or(-1);
        tracing::debug!(format = command.format_name(), exit_code = code, "Conversion exited");
        Ok(code)
    }
}

async fn forward<R>(stream: R, is_stderr: bool)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if is_stderr {
            tracing::debug!(target: "geobundle::process", "{line}");
        } else {
            tracing::trace!(target: "geobundle::process", "{line}");
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::dataset::{BuilderOptions, FileDataSource, VectorDatasetBuilder};
    use crate::domain::GeometryFormat;
    use tempfile::TempDir;

    fn command(program: &str) -> CommandInfo {
        VectorDatasetBuilder::new(BuilderOptions::default())
            .program(program)
            .input_dataset(FileDataSource::new(GeometryFormat::GeoPackage, "in", "b"))
            .output_dataset(FileDataSource::new(GeometryFormat::GeoJson, "out", "b"))
            .build("GeoJSON")
            .unwrap()
    }

    #[tokio::test]
    async fn test_exit_codes_are_reported() {
        let workspace = TempDir::new().unwrap();

        assert_eq!(ProcessRunner.run(&command("true"), workspace.path()).await.unwrap(), 0);
        assert_eq!(ProcessRunner.run(&command("false"), workspace.path()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_program() {
        let workspace = TempDir::new().unwrap();
        let result = ProcessRunner
            .run(&command("geobundle-no-such-program"), workspace.path())
            .await;
        assert!(matches!(result, Err(BundleError::Conversion(_))));
    }
}
