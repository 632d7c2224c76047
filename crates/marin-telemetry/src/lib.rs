//! Marin Telemetry - logging setup for Marin widgets.
//!
//! This crate provides:
//! - [`LogConfig`] with pretty, compact, JSON and full formats
//! - Output to stdout, stderr or rotating files
//! - With the `config` feature, conversion from the `[logging]` section of
//!   `marin-config`
//!
//! # Example
//!
//! ```rust,no_run
//! use marin_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), marin_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("marin_dispatch=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

#[cfg(feature = "config")]
mod bridge;
mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging,
};
