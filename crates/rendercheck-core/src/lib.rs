//! Rendercheck Core - Foundation crate for the rendercheck harness.
//!
//! This crate provides the configuration layer and central error types that
//! the browser and CLI crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with environment overrides
//!
//! # Example
//!
//! ```rust
//! use rendercheck_core::VerifyConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VerifyConfig::default();
//! assert_eq!(config.target.url, "http://localhost:5000");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{BrowserConfig, OutputConfig, TargetConfig, VerifyConfig, WaitConfig};
pub use error::{ConfigError, ConfigResult};
