//! Integration tests for graceful shutdown
//!
//! A shutdown request stops a running job at its next checkpoint. Formats
//! already published stay published and nothing further is converted.

mod common;

use common::{bundle, harness_with, RecordingRunner, StubLayers};
use geobundle::core::bundle::{BundleBuildingContext, TASK_NAME};
use geobundle::core::dispatch::TaskPayload;
use geobundle::domain::{BundleError, GeometryFormat};
use tokio::sync::watch;

fn request() -> TaskPayload {
    TaskPayload::new(BundleBuildingContext::new(
        bundle(),
        vec![
            GeometryFormat::MapboxVectorTiles,
            GeometryFormat::GeoJson,
        ],
    ))
}

#[tokio::test]
async fn test_shutdown_signal_propagation() {
    let (shutdown_tx, shutdown_rx1) = watch::channel(false);
    let shutdown_rx2 = shutdown_rx1.clone();

    assert!(!*shutdown_rx1.borrow());
    assert!(!*shutdown_rx2.borrow());

    shutdown_tx.send(true).unwrap();

    assert!(*shutdown_rx1.borrow());
    assert!(*shutdown_rx2.borrow());
}

#[tokio::test]
async fn test_shutdown_before_submit_converts_nothing() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let h = harness_with(RecordingRunner::new(), StubLayers::present(), shutdown_rx);
    shutdown_tx.send(true).unwrap();

    let err = h.dispatcher.submit(TASK_NAME, request()).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(h.runner.commands().is_empty());
    assert!(h.storage.events().is_empty());
    assert_eq!(h.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_shutdown_after_canonical_stops_before_derived() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = RecordingRunner::new().cancel_after("GPKG", shutdown_tx);
    let h = harness_with(runner, StubLayers::present(), shutdown_rx);

    let err = h.dispatcher.submit(TASK_NAME, request()).await.unwrap_err();

    assert!(matches!(err, BundleError::Cancelled));
    assert_eq!(h.runner.format_names(), vec!["GPKG"]);
    assert!(h.storage.events().is_empty());
}

#[tokio::test]
async fn test_shutdown_between_formats_keeps_published_work() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = RecordingRunner::new().cancel_after("GeoJSON", shutdown_tx);
    let h = harness_with(runner, StubLayers::present(), shutdown_rx);

    let err = h.dispatcher.submit(TASK_NAME, request()).await.unwrap_err();

    // MVT was published before the request, GeoJSON was converted but not published
    assert!(err.is_cancelled());
    assert_eq!(h.runner.format_names(), vec!["GPKG", "MVT", "GeoJSON"]);
    assert_eq!(h.storage.stored_paths().len(), 1);
    assert!(h.storage.stored_paths()[0].ends_with("/MVT"));
    assert_eq!(h.leftover_workspaces(), 0);
}
