//! headerkind core: classifier engine, header sources, configuration.

pub mod classifier;
pub mod config;
pub mod error;
pub mod registry;
pub mod source;

pub use classifier::{Kind, Negated, Session, Vocabulary, NOT};
pub use config::{HeaderKindConfig, DEFAULT_MAX_DECODE_ROUNDS};
pub use error::{Error, Result};
pub use registry::SessionRegistry;
pub use source::{classify, ExtensionSource, HeaderSource};
