//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (ClientConfig, ServerConfig, IdentityConfig)
//! - [`limits`]: Line length limits (LimitsConfig)
//! - [`defaults`]: serde default functions
//! - [`validation`]: startup checks

mod defaults;
mod limits;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use types::{
    ClientConfig, ConfigError, IdentityConfig, LogConfig, LogFormat, ServerConfig, SessionConfig,
};
pub use validation::{ValidationError, validate};
