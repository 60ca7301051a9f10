//! Error types for headerkind.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A kind name outside the classifier's vocabulary was read.
    #[error("{classifier} does not support {kind}")]
    UnsupportedKind {
        classifier: &'static str,
        kind: String,
    },
}

impl Error {
    /// The offending kind name.
    pub fn kind(&self) -> &str {
        match self {
            Self::UnsupportedKind { kind, .. } => kind,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_message() {
        let err = Error::UnsupportedKind {
            classifier: "contentTypeIs",
            kind: "unsupportedType".into(),
        };
        assert_eq!(err.to_string(), "contentTypeIs does not support unsupportedType");
        assert_eq!(err.kind(), "unsupportedType");
    }
}
