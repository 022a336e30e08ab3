//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use parley_proto::{ChannelExt, NickExt, normalize_channel_name};
use thiserror::Error;

use super::ClientConfig;

/// Smallest accepted inbound line limit.
const MIN_LINE_LEN: usize = 64;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must be non-zero")]
    InvalidPort,
    #[error("identity.nick is not a valid nickname: '{0}'")]
    InvalidNick(String),
    #[error("session.channels entry is not a valid channel name: '{0}'")]
    InvalidChannel(String),
    #[error("limits.max_line_len must be at least 64, got {0}")]
    LineLimitTooSmall(usize),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    if !config.identity.nick.is_valid_nick() {
        errors.push(ValidationError::InvalidNick(config.identity.nick.clone()));
    }

    for channel in &config.session.channels {
        if !normalize_channel_name(channel).is_channel_name() {
            errors.push(ValidationError::InvalidChannel(channel.clone()));
        }
    }

    if config.limits.max_line_len < MIN_LINE_LEN {
        errors.push(ValidationError::LineLimitTooSmall(config.limits.max_line_len));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
