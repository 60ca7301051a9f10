//! Path traversal detection.
//!
//! Attackers hide `..` segments behind nested percent-encoding (`%252e`) or
//! split escapes (`%252%66`). [`contains_path_traversal`] decodes the path
//! repeatedly, up to a bounded number of rounds, then looks for a `..`
//! segment in the result.

use std::borrow::Cow;

use headerkind_core::DEFAULT_MAX_DECODE_ROUNDS;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Decoding limits for [`contains_path_traversal_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeOptions {
    /// Maximum number of decode rounds.
    pub max_iterations: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_DECODE_ROUNDS,
        }
    }
}

/// Whether `pathname` contains a `..` segment after decoding.
pub fn contains_path_traversal(pathname: &str) -> bool {
    contains_path_traversal_with(pathname, DecodeOptions::default())
}

pub fn contains_path_traversal_with(pathname: &str, options: DecodeOptions) -> bool {
    let decoded = decode_repeatedly(pathname, options.max_iterations);
    decoded.split('/').any(|segment| segment == "..")
}

/// Percent-decode until the string stops changing, decoding fails, or
/// `max_iterations` rounds have run. Returns the last successfully decoded
/// string.
pub fn decode_repeatedly(input: &str, max_iterations: usize) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(input);
    for round in 0..max_iterations {
        let next = match urlencoding::decode(&current) {
            Ok(decoded) if decoded != current => decoded.into_owned(),
            Ok(_) => break,
            Err(err) => {
                trace!(round, error = %err, "decode stopped on invalid utf-8");
                break;
            }
        };
        current = Cow::Owned(next);
    }
    current
}
