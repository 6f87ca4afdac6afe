//! Error types for `keyfm-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A file or folder name is invalid (empty, contains path separators, etc.).
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// A folder move would place the folder inside itself.
    #[error("cannot move {key} into {destination}: folder would contain itself")]
    NestedInItself {
        /// The folder being moved.
        key: String,
        /// The destination folder prefix.
        destination: String,
    },

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `keyfm-core`.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_displays_name() {
        let err = CoreError::InvalidName("bad/name".to_string());
        assert_eq!(err.to_string(), "invalid name: \"bad/name\"");
    }

    #[test]
    fn nested_in_itself_displays_both_keys() {
        let err = CoreError::NestedInItself {
            key: "a/".to_string(),
            destination: "a/b/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot move a/ into a/b/: folder would contain itself"
        );
    }

    #[test]
    fn not_found_displays_path() {
        let err = CoreError::NotFound(PathBuf::from("/missing/keyfm.toml"));
        assert_eq!(err.to_string(), "path not found: /missing/keyfm.toml");
    }

    #[test]
    fn config_parse_displays_message() {
        let err = CoreError::ConfigParse("unexpected token".to_string());
        assert_eq!(err.to_string(), "config parse error: unexpected token");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "gone");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
        assert!(core_err.to_string().contains("gone"));
    }
}
