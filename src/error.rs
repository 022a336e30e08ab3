//! Unified error handling for parley.
//!
//! Only transport failures surface as errors. Malformed lines, references to
//! untracked channels or members, and vetoed sends are ordinary outcomes and
//! never reach these types.

use parley_proto::ProtocolError;
use thiserror::Error;

// ============================================================================
// Transport Errors
// ============================================================================

/// Failures of the line transport. All of them end the current connection.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("transport is not open")]
    NotOpen,

    #[error("transport closed")]
    Closed,

    #[error("transport requires a tokio runtime")]
    NoRuntime,
}

impl TransportError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Protocol(_) => "protocol",
            Self::NotOpen => "not_open",
            Self::Closed => "closed",
            Self::NoRuntime => "no_runtime",
        }
    }
}

// ============================================================================
// Engine Errors
// ============================================================================

/// Errors returned by the connection engine and the session manager.
///
/// Every variant means the engine has already moved to `Disconnected`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl EngineError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(e) => e.error_code(),
        }
    }
}

/// Result type for engine and session operations.
pub type EngineResult<T> = Result<T, EngineError>;
