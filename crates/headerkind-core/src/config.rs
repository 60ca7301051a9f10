//! Runtime configuration read from the environment.

use serde::{Deserialize, Serialize};

/// Decode rounds used by the traversal guard when nothing is configured.
pub const DEFAULT_MAX_DECODE_ROUNDS: usize = 4;

/// Top-level headerkind configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderKindConfig {
    /// HTTP server port.
    pub port: u16,
    /// Address the server binds to.
    pub bind: String,
    /// Maximum percent-decoding rounds for path traversal checks.
    pub max_decode_rounds: usize,
}

impl Default for HeaderKindConfig {
    fn default() -> Self {
        Self {
            port: 3003,
            bind: "0.0.0.0".to_string(),
            max_decode_rounds: DEFAULT_MAX_DECODE_ROUNDS,
        }
    }
}

impl HeaderKindConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unparseable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let bind = lookup("HEADERKIND_BIND")
            .filter(|b| !b.trim().is_empty())
            .unwrap_or(defaults.bind);
        let max_decode_rounds = lookup("HEADERKIND_MAX_DECODE_ROUNDS")
            .and_then(|r| r.parse().ok())
            .unwrap_or(defaults.max_decode_rounds);

        Self {
            port,
            bind,
            max_decode_rounds,
        }
    }

    /// `bind:port`, ready for a listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
