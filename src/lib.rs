// geobundle - map bundle export pipeline
// Copyright (c) 2025 Geobundle Contributors
// Licensed under the MIT License

//! # geobundle
//!
//! geobundle exports organization map bundles from a PostGIS database into
//! spatial dataset formats and publishes them to blob storage.
//!
//! ## Overview
//!
//! A bundle names an organization and a map layer. Building it:
//! - **Exports** the layer rows inside the organization's fence into a GeoPackage
//! - **Derives** vector tiles, Shapefile and GeoJSON from that GeoPackage
//! - **Publishes** each derived format to `dist/ORG<org>/BND<bundle>/<FORMAT>`
//!
//! Conversions are delegated to an external program (`ogr2ogr` by default).
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Dataset commands, job dispatch and the bundle job
//! - [`adapters`] - PostgreSQL repositories and blob storage
//! - [`domain`] - Identifiers, bundles, layers, formats and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], with
//! [`domain::BundleError`] as the error type:
//!
//! ```rust
//! use geobundle::domain::{BundleError, GeometryFormat};
//!
//! let err = "kml".parse::<GeometryFormat>().unwrap_err();
//! assert!(matches!(err, BundleError::Validation(_)));
//! ```
//!
//! ## Logging
//!
//! geobundle logs through `tracing`; each job runs inside a `task` span
//! carrying the task name and job id.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
