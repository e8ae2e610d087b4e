//! The bundle building task

use crate::adapters::repository::LayerRepository;
use crate::core::bundle::payload::{BundleBuildingContext, TASK_NAME};
use crate::core::bundle::publish::{destination_path, Publisher};
use crate::core::command::CommandTaskContext;
use crate::core::dataset::{
    BuilderOptions, BundleLayerSource, DataSource, FileDataSource, PostgresDataSource,
    VectorDatasetBuilder,
};
use crate::core::dispatch::{CommandTask, TaskPayload};
use crate::domain::{Bundle, BundleError, GeometryFormat, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Name of the marker file written to the workspace root
const MARKER_FILE: &str = "BUNDLE";

/// Progress of one bundle build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    ValidatingRequest,
    BuildingCanonical,
    DerivingFormat(GeometryFormat),
    Publishing(GeometryFormat),
    Done,
    Aborted,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildState::Idle => f.write_str("idle"),
            BuildState::ValidatingRequest => f.write_str("validating_request"),
            BuildState::BuildingCanonical => f.write_str("building_canonical"),
            BuildState::DerivingFormat(format) => write!(f, "deriving_format({format})"),
            BuildState::Publishing(format) => write!(f, "publishing({format})"),
            BuildState::Done => f.write_str("done"),
            BuildState::Aborted => f.write_str("aborted"),
        }
    }
}

struct StateTracker(BuildState);

impl StateTracker {
    fn enter(&mut self, next: BuildState) {
        tracing::debug!(from = %self.0, to = %next, "Bundle build state");
        self.0 = next;
    }
}

/// Builds a bundle into the requested formats and publishes them
///
/// The GeoPackage is always produced first, straight from the database and
/// limited to the part of the layer inside the organization's fence. Every
/// other format is converted from that GeoPackage.
pub struct BundleJob {
    layers: Arc<dyn LayerRepository + Send + Sync>,
    publisher: Publisher,
    database: PostgresDataSource,
    program: String,
}

impl BundleJob {
    /// Create the job
    pub fn new(
        layers: Arc<dyn LayerRepository + Send + Sync>,
        publisher: Publisher,
        database: PostgresDataSource,
        program: impl Into<String>,
    ) -> Self {
        Self {
            layers,
            publisher,
            database,
            program: program.into(),
        }
    }

    async fn build(
        &self,
        context: &CommandTaskContext,
        request: &BundleBuildingContext,
        state: &mut StateTracker,
    ) -> Result<usize> {
        state.enter(BuildState::ValidatingRequest);
        if request.formats.is_empty() {
            tracing::warn!(bundle_id = %request.bundle.id, "No formats listed for export");
            return Ok(0);
        }

        let bundle = &request.bundle;
        let derived = request.derived_formats();
        crate::log_build_start!(bundle.id, derived.len() + 1);
        write_marker(context, bundle).await;

        context.ensure_not_cancelled()?;
        state.enter(BuildState::BuildingCanonical);
        let layer = self.layers.get_layer_by_id(&bundle.layer_id).await?;
        let filter = BundleLayerSource::new(bundle, &layer, context.workspace());
        let canonical = self
            .convert(
                context,
                bundle,
                self.database.clone().into(),
                GeometryFormat::CANONICAL,
                Some(filter),
            )
            .await?;

        let mut published = 0;
        for format in derived {
            context.ensure_not_cancelled()?;
            state.enter(BuildState::DerivingFormat(format));
            let output = self
                .convert(context, bundle, canonical.clone().into(), format, None)
                .await?;

            context.ensure_not_cancelled()?;
            state.enter(BuildState::Publishing(format));
            let destination = destination_path(&bundle.organization_id, &bundle.id, format);
            self.publisher
                .publish(&destination, &output.path_prefix, format)
                .await?;
            published += 1;
        }

        Ok(published)
    }

    /// Convert `input` into `format` inside the workspace
    async fn convert(
        &self,
        context: &CommandTaskContext,
        bundle: &Bundle,
        input: DataSource,
        format: GeometryFormat,
        layers: Option<BundleLayerSource>,
    ) -> Result<FileDataSource> {
        let property = format.property();
        let directory = context.create_directory(property.short_name).await?;
        let output = FileDataSource::new(format, directory, bundle.to_string());

        let mut builder = VectorDatasetBuilder::new(BuilderOptions::for_format(format))
            .program(self.program.as_str())
            .input_dataset(input)
            .output_dataset(output.clone());
        if let Some(layers) = layers {
            builder = builder.input_layers(layers);
        }
        let command = builder.build(property.format_name)?;

        tracing::debug!(format = %format, output = %output.path().display(), "Converting");
        let exit_code = context.run_command(&command).await?;
        if exit_code != 0 {
            return Err(BundleError::ConversionFailed {
                format: property.short_name.to_string(),
                exit_code,
            });
        }

        Ok(output)
    }
}

/// Write the `BUNDLE` marker naming the bundle; failures are only logged
async fn write_marker(context: &CommandTaskContext, bundle: &Bundle) {
    let path = context.workspace().join(MARKER_FILE);
    if let Err(e) = tokio::fs::write(&path, bundle.to_string()).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to write bundle marker");
    }
}

#[async_trait]
impl CommandTask for BundleJob {
    fn name(&self) -> &str {
        TASK_NAME
    }

    fn accepts_payload(&self, payload: &TaskPayload) -> bool {
        payload.is::<BundleBuildingContext>()
    }

    async fn execute(&self, context: &mut CommandTaskContext) -> Result<()> {
        let payload = context.payload().clone();
        let request = payload
            .downcast_ref::<BundleBuildingContext>()
            .ok_or_else(|| {
                BundleError::Validation("Payload is not a bundle building request".to_string())
            })?;

        let mut state = StateTracker(BuildState::Idle);
        match self.build(context, request, &mut state).await {
            Ok(published) => {
                state.enter(BuildState::Done);
                tracing::info!(
                    bundle_id = %request.bundle.id,
                    published,
                    "Bundle build completed"
                );
                Ok(())
            }
            Err(e) => {
                let failed_in = state.0;
                state.enter(BuildState::Aborted);
                tracing::error!(
                    bundle_id = %request.bundle.id,
                    state = %failed_in,
                    error = %e,
                    "Bundle build aborted"
                );
                Err(e)
            }
        }
    }
}
