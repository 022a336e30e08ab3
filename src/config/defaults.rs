//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use crate::engine::{DEFAULT_CONNECT_DELAY, DEFAULT_PORT, DEFAULT_USER_PLACEHOLDER};

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_port() -> u16 {
    DEFAULT_PORT
}

// =============================================================================
// Identity Defaults
// =============================================================================

pub fn default_user() -> String {
    DEFAULT_USER_PLACEHOLDER.to_string()
}

// =============================================================================
// Session Defaults
// =============================================================================

pub fn default_connect_delay_ms() -> u64 {
    DEFAULT_CONNECT_DELAY.as_millis() as u64
}

// =============================================================================
// Log Defaults
// =============================================================================

pub fn default_log_filter() -> String {
    "info".to_string()
}
