//! Command-line subcommands that run without starting the server.

use headerkind_core::HeaderKindConfig;
use headerkind_traversal::{contains_path_traversal_with, DecodeOptions};

/// Exit code for a path free of traversal.
pub const EXIT_SAFE: i32 = 0;
/// Exit code when traversal is found.
pub const EXIT_TRAVERSAL: i32 = 1;
/// Exit code for bad usage, such as a missing path.
pub const EXIT_USAGE: i32 = 2;

/// Printed to stderr when `check-path` gets no path.
pub const CHECK_PATH_USAGE: &str = "Usage: headerkind check-path <path>";

/// `check-path [path]`: message to print plus the process exit code.
pub fn check_path(path: Option<&str>, config: &HeaderKindConfig) -> (&'static str, i32) {
    let Some(path) = path else {
        return (CHECK_PATH_USAGE, EXIT_USAGE);
    };
    let options = DecodeOptions {
        max_iterations: config.max_decode_rounds,
    };
    if contains_path_traversal_with(path, options) {
        ("traversal", EXIT_TRAVERSAL)
    } else {
        ("safe", EXIT_SAFE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_path_traversal() {
        let config = HeaderKindConfig::default();
        assert_eq!(check_path(Some("/foo/%252e%252e/bar"), &config), ("traversal", EXIT_TRAVERSAL));
        assert_eq!(check_path(Some("../etc/passwd"), &config), ("traversal", EXIT_TRAVERSAL));
    }

    #[test]
    fn test_check_path_safe() {
        let config = HeaderKindConfig::default();
        assert_eq!(check_path(Some("/foo/%2e/bar"), &config), ("safe", EXIT_SAFE));
        assert_eq!(check_path(Some("/sim%20MJ%20to%20Redeem"), &config), ("safe", EXIT_SAFE));
    }

    #[test]
    fn test_check_path_without_path() {
        let config = HeaderKindConfig::default();
        assert_eq!(check_path(None, &config), (CHECK_PATH_USAGE, EXIT_USAGE));
    }

    #[test]
    fn test_check_path_uses_configured_rounds() {
        let config = HeaderKindConfig {
            max_decode_rounds: 1,
            ..HeaderKindConfig::default()
        };
        assert_eq!(check_path(Some("/%252e%252e"), &config), ("safe", EXIT_SAFE));
        assert_eq!(check_path(Some("/%2e%2e"), &config), ("traversal", EXIT_TRAVERSAL));
    }
}
