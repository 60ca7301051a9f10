//! Shared application state.

use headerkind_core::HeaderKindConfig;
use headerkind_traversal::DecodeOptions;

/// Shared application state accessible from all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: HeaderKindConfig,
    /// Decode limits applied by the traversal guard.
    pub decode: DecodeOptions,
}

impl AppState {
    pub fn new(config: HeaderKindConfig) -> Self {
        let decode = DecodeOptions {
            max_iterations: config.max_decode_rounds,
        };
        Self { config, decode }
    }
}
