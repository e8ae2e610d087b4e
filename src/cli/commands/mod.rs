//! CLI command implementations
//!
//! Exit codes: 0 success, 2 configuration or input error, 4 connection error,
//! 5 fatal or build failure, 130 cancelled.

pub mod build;
pub mod init;
pub mod validate;
