//! Logging and observability
//!
//! Structured logging through `tracing`, with a console layer and an optional
//! rotated JSON file sink.
//!
//! # Example
//!
//! ```no_run
//! use geobundle::logging::init_logging;
//! use geobundle::config::LoggingConfig;
//!
//! let config = LoggingConfig::console_only();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a bundle build
///
/// # Example
///
/// ```no_run
/// use geobundle::log_build_start;
/// use geobundle::domain::BundleId;
///
/// let bundle_id = BundleId::new_v4();
/// log_build_start!(&bundle_id, 3);
/// ```
#[macro_export]
macro_rules! log_build_start {
    ($bundle_id:expr, $format_count:expr) => {
        tracing::info!(
            bundle_id = %$bundle_id,
            formats = $format_count,
            "Starting bundle build"
        );
    };
}

/// Log a finished publish of one format
///
/// # Example
///
/// ```no_run
/// use geobundle::log_publish_complete;
/// use std::time::Duration;
///
/// log_publish_complete!("dist/ORGa/BNDb/MVT", Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_publish_complete {
    ($destination:expr, $duration:expr) => {
        tracing::info!(
            destination = %$destination,
            duration_ms = $duration.as_millis() as u64,
            "Published format"
        );
    };
}

/// Log an error with context
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
