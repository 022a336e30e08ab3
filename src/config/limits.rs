//! Line length limits configuration.

use parley_proto::MAX_LINE_LEN;
use serde::Deserialize;

/// Line length limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum inbound line length in bytes, terminator included (default: 512).
    /// Longer lines end the connection with a protocol error.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
        }
    }
}

fn default_max_line_len() -> usize {
    MAX_LINE_LEN
}
