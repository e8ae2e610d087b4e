//! Shared stubs for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use geobundle::adapters::repository::LayerRepository;
use geobundle::adapters::storage::{BlobStorage, StorageObject};
use geobundle::config::{secret_string, WorkspaceConfig};
use geobundle::core::bundle::{BundleJob, Publisher};
use geobundle::core::command::CommandRunner;
use geobundle::core::dataset::{CommandInfo, PostgresDataSource};
use geobundle::core::dispatch::TaskDispatcher;
use geobundle::domain::{
    Bundle, BundleError, BundleId, Layer, LayerId, OrganizationId, Result,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;

pub const CACHE_CONTROL: &str = "public, max-age=10800";

/// A conversion seen by [`RecordingRunner`]
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    pub format_name: String,
    pub args: Vec<String>,
    pub output: PathBuf,
    pub workspace: PathBuf,
    pub marker: Option<String>,
}

/// Records every command and answers with a configured exit code
#[derive(Default)]
pub struct RecordingRunner {
    exit_codes: HashMap<String, i32>,
    cancel_after: Option<(String, watch::Sender<bool>)>,
    commands: Mutex<Vec<RecordedCommand>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with `code` when converting to the driver `format_name`
    pub fn failing(mut self, format_name: &str, code: i32) -> Self {
        self.exit_codes.insert(format_name.to_string(), code);
        self
    }

    /// Request shutdown once the driver `format_name` has run
    pub fn cancel_after(mut self, format_name: &str, shutdown: watch::Sender<bool>) -> Self {
        self.cancel_after = Some((format_name.to_string(), shutdown));
        self
    }

    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub fn format_names(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .map(|c| c.format_name)
            .collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &CommandInfo, workspace: &Path) -> Result<i32> {
        let format_name = command.format_name().to_string();
        self.commands.lock().unwrap().push(RecordedCommand {
            format_name: format_name.clone(),
            args: command.exposed_args().map(str::to_string).collect(),
            output: command.output().to_path_buf(),
            workspace: workspace.to_path_buf(),
            marker: std::fs::read_to_string(workspace.join("BUNDLE")).ok(),
        });

        if let Some((after, shutdown)) = &self.cancel_after {
            if *after == format_name {
                let _ = shutdown.send(true);
            }
        }

        Ok(self.exit_codes.get(&format_name).copied().unwrap_or(0))
    }
}

/// What [`RecordingStorage`] was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEvent {
    Remove(String),
    Store {
        path: String,
        source: PathBuf,
        object: StorageObject,
    },
}

impl StorageEvent {
    pub fn path(&self) -> &str {
        match self {
            StorageEvent::Remove(path) => path,
            StorageEvent::Store { path, .. } => path,
        }
    }
}

/// Records storage calls, pausing inside each so concurrent callers overlap
#[derive(Default)]
pub struct RecordingStorage {
    events: Mutex<Vec<StorageEvent>>,
    fail_store_suffix: Option<String>,
}

impl RecordingStorage {
    /// Fail `store_directory` for destinations ending in `suffix`
    pub fn failing_store(suffix: &str) -> Self {
        Self {
            fail_store_suffix: Some(suffix.to_string()),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<StorageEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn stored_paths(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                StorageEvent::Store { path, .. } => Some(path),
                StorageEvent::Remove(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl BlobStorage for RecordingStorage {
    async fn remove_directory(&self, path: &str) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(StorageEvent::Remove(path.to_string()));
        tokio::time::sleep(Duration::from_millis(2)).await;
        Ok(())
    }

    async fn store_directory(
        &self,
        path: &str,
        source: &Path,
        object: &StorageObject,
    ) -> Result<()> {
        tokio::time::sleep(Duration::from_millis(2)).await;
        if let Some(suffix) = &self.fail_store_suffix {
            if path.ends_with(suffix.as_str()) {
                return Err(BundleError::Storage(format!("Upload to {path} rejected")));
            }
        }
        self.events.lock().unwrap().push(StorageEvent::Store {
            path: path.to_string(),
            source: source.to_path_buf(),
            object: object.clone(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Serves a layer named `incident` for any id, or nothing at all
pub struct StubLayers {
    missing: bool,
}

impl StubLayers {
    pub fn present() -> Self {
        Self { missing: false }
    }

    pub fn missing() -> Self {
        Self { missing: true }
    }
}

#[async_trait]
impl LayerRepository for StubLayers {
    async fn get_layer_by_id(&self, id: &LayerId) -> Result<Layer> {
        if self.missing {
            return Err(BundleError::NotFound(format!("Layer {id}")));
        }
        Ok(Layer::new(*id, "incident", "Incidents"))
    }
}

pub fn bundle() -> Bundle {
    Bundle::builder()
        .id(BundleId::new_v4())
        .organization_id(OrganizationId::new_v4())
        .layer_id(LayerId::new_v4())
        .name("Foundation risk")
        .build()
        .unwrap()
}

pub struct Harness {
    pub dispatcher: TaskDispatcher,
    pub runner: Arc<RecordingRunner>,
    pub storage: Arc<RecordingStorage>,
    pub workspace_root: TempDir,
}

impl Harness {
    /// Entries left below the workspace root
    pub fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(self.workspace_root.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn harness(runner: RecordingRunner) -> Harness {
    let (_tx, rx) = watch::channel(false);
    harness_with(runner, StubLayers::present(), rx)
}

pub fn harness_with(
    runner: RecordingRunner,
    layers: StubLayers,
    shutdown: watch::Receiver<bool>,
) -> Harness {
    build_harness(runner, layers, RecordingStorage::default(), shutdown)
}

pub fn harness_with_storage(runner: RecordingRunner, storage: RecordingStorage) -> Harness {
    let (_tx, rx) = watch::channel(false);
    build_harness(runner, StubLayers::present(), storage, rx)
}

fn build_harness(
    runner: RecordingRunner,
    layers: StubLayers,
    storage: RecordingStorage,
    shutdown: watch::Receiver<bool>,
) -> Harness {
    let runner = Arc::new(runner);
    let storage = Arc::new(storage);
    let workspace_root = TempDir::new().unwrap();

    let mut dispatcher = TaskDispatcher::new(
        runner.clone(),
        WorkspaceConfig {
            root: workspace_root.path().to_path_buf(),
            keep_workspace: false,
        },
        shutdown,
    );
    dispatcher.register(Arc::new(BundleJob::new(
        Arc::new(layers),
        Publisher::new(storage.clone(), CACHE_CONTROL),
        PostgresDataSource::new(secret_string(
            "postgresql://gis:secret@db:5432/fundermaps".to_string(),
        )),
        "ogr2ogr",
    )));

    Harness {
        dispatcher,
        runner,
        storage,
        workspace_root,
    }
}
