//! Path-key codec.
//!
//! Keys are forward-slash-delimited strings such as `"photos/cats/a.png"`.
//! A trailing `/` marks a folder. Everything here is a pure string
//! operation: no function panics on keys without `/` or `.`.

use unicode_normalization::UnicodeNormalization;

use crate::error::{CoreError, CoreResult};

/// Key segment used for a folder that is being created but not yet named.
pub const NEW_FOLDER_SEGMENT: &str = "__new__";

/// Returns `true` if `key` denotes a folder (ends with `/`).
pub fn is_folder(key: &str) -> bool {
    key.ends_with('/')
}

/// Returns the display name of `key`.
///
/// For a file this is the text after the last `/`; for a folder it is the
/// segment before the trailing `/`.
///
/// ```
/// use keyfm_core::key;
///
/// assert_eq!(key::name("photos/cats/a.png"), "a.png");
/// assert_eq!(key::name("photos/cats/"), "cats");
/// assert_eq!(key::name("readme"), "readme");
/// ```
pub fn name(key: &str) -> &str {
    let trimmed = key.strip_suffix('/').unwrap_or(key);
    last_segment(trimmed)
}

/// Returns the lower-cased extension of the final path segment, or `""`.
pub fn extension(key: &str) -> String {
    name(key)
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_lowercase())
        .unwrap_or_default()
}

/// Returns everything up to and including the last `/`, or `""` if there is none.
///
/// For folder keys the trailing slash is the last one, so the folder key
/// itself is returned; use [`parent_folder`] to get the enclosing folder.
pub fn parent_prefix(key: &str) -> &str {
    match key.rfind('/') {
        Some(idx) => &key[..=idx],
        None => "",
    }
}

/// Returns the key of the folder that contains `key` (`""` at the root).
pub fn parent_folder(key: &str) -> &str {
    parent_prefix(key.strip_suffix('/').unwrap_or(key))
}

/// Returns the text after the last `/` (the whole key if there is none).
pub fn last_segment(key: &str) -> &str {
    match key.rfind('/') {
        Some(idx) => &key[idx + 1..],
        None => key,
    }
}

/// Returns the second-to-last `/`-separated segment of a folder key.
///
/// `"a/b/"` yields `Some("b")`; a key without any `/` yields `None`.
pub fn folder_segment(key: &str) -> Option<&str> {
    let mut segments = key.rsplit('/');
    segments.next()?;
    segments.next()
}

/// Returns `true` if `key` is a placeholder for a folder that has not been
/// named yet (its last non-empty segment is [`NEW_FOLDER_SEGMENT`]).
pub fn is_new_folder_placeholder(key: &str) -> bool {
    name(key) == NEW_FOLDER_SEGMENT
}

/// Validates a user-supplied file or folder name.
///
/// Returns the trimmed, NFC-normalised name.
///
/// # Errors
///
/// [`CoreError::InvalidName`] if the trimmed name is empty or contains
/// `/` or `\`.
pub fn validate_name(name: &str) -> CoreResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
        return Err(CoreError::InvalidName(name.to_string()));
    }
    Ok(trimmed.nfc().collect())
}

/// Computes the key of file `old_key` after renaming it to `new_name`.
///
/// # Errors
///
/// [`CoreError::InvalidName`] if `new_name` fails [`validate_name`].
pub fn renamed_file_key(old_key: &str, new_name: &str) -> CoreResult<String> {
    let name = validate_name(new_name)?;
    Ok(format!("{}{}", parent_prefix(old_key), name))
}

/// Computes the key of folder `old_key` after renaming it to `new_name`.
///
/// # Errors
///
/// [`CoreError::InvalidName`] if `new_name` fails [`validate_name`].
pub fn renamed_folder_key(old_key: &str, new_name: &str) -> CoreResult<String> {
    let name = validate_name(new_name)?;
    Ok(format!("{}{}/", parent_folder(old_key), name))
}

/// Computes the key of file `key` after dropping it into `destination`.
pub fn moved_file_key(key: &str, destination: &str) -> String {
    format!("{destination}{}", last_segment(key))
}

/// Computes the key of folder `key` after dropping it into `destination`.
///
/// # Errors
///
/// [`CoreError::NestedInItself`] if the new key would lie inside `key`.
pub fn moved_folder_key(key: &str, destination: &str) -> CoreResult<String> {
    let folder = folder_segment(key).unwrap_or_default();
    let new_key = format!("{destination}{folder}/");
    if new_key.starts_with(key) {
        return Err(CoreError::NestedInItself {
            key: key.to_string(),
            destination: destination.to_string(),
        });
    }
    Ok(new_key)
}

/// Rewrites `key` from under `old_prefix` to under `new_prefix`.
///
/// Returns `None` when `key` is not `old_prefix` or one of its descendants.
pub fn rebase(key: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    key.strip_prefix(old_prefix)
        .map(|rest| format!("{new_prefix}{rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_folder_matches_trailing_slash() {
        for key in ["", "a", "a/", "a/b", "a/b/", "/", "a.b/c.d"] {
            assert_eq!(is_folder(key), key.ends_with('/'), "key {key:?}");
        }
    }

    #[test]
    fn name_of_file_and_folder() {
        assert_eq!(name("photos/cats/a.png"), "a.png");
        assert_eq!(name("photos/cats/"), "cats");
        assert_eq!(name("top/"), "top");
        assert_eq!(name("plain"), "plain");
        assert_eq!(name(""), "");
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension("a/B.PNG"), "png");
        assert_eq!(extension("archive.tar.GZ"), "gz");
        assert_eq!(extension("Makefile"), "");
        assert_eq!(extension("v1.2/readme"), "");
    }

    #[test]
    fn parent_prefix_includes_slash() {
        assert_eq!(parent_prefix("a/b/c.txt"), "a/b/");
        assert_eq!(parent_prefix("c.txt"), "");
        assert_eq!(parent_prefix("a/b/"), "a/b/");
    }

    #[test]
    fn parent_folder_of_folder_key() {
        assert_eq!(parent_folder("a/b/"), "a/");
        assert_eq!(parent_folder("a/"), "");
        assert_eq!(parent_folder("a/b.txt"), "a/");
    }

    #[test]
    fn folder_segment_is_second_to_last() {
        assert_eq!(folder_segment("a/b/"), Some("b"));
        assert_eq!(folder_segment("b/"), Some("b"));
        assert_eq!(folder_segment("plain"), None);
    }

    #[test]
    fn new_folder_placeholder_detection() {
        assert!(is_new_folder_placeholder("docs/__new__/"));
        assert!(is_new_folder_placeholder("__new__/"));
        assert!(is_new_folder_placeholder("docs/__new__"));
        assert!(!is_new_folder_placeholder("docs/__new__x/"));
        assert!(!is_new_folder_placeholder("docs/"));
    }

    #[test]
    fn validate_name_rejects_separators_and_blank() {
        for bad in ["a/b", "a\\b", "", "   "] {
            assert!(
                matches!(validate_name(bad), Err(CoreError::InvalidName(_))),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(validate_name("  report.pdf ").unwrap(), "report.pdf");
    }

    #[test]
    fn validate_name_composes_unicode() {
        let decomposed = "\u{1112}\u{1161}\u{11AB}.txt";
        assert_eq!(validate_name(decomposed).unwrap(), "\u{D55C}.txt");
    }

    #[test]
    fn renamed_file_keeps_parent() {
        assert_eq!(renamed_file_key("a/b/c.txt", "d.txt").unwrap(), "a/b/d.txt");
        assert_eq!(renamed_file_key("c.txt", " d.txt ").unwrap(), "d.txt");
    }

    #[test]
    fn renamed_folder_keeps_parent() {
        assert_eq!(renamed_folder_key("a/b/", "c").unwrap(), "a/c/");
        assert_eq!(renamed_folder_key("b/", "c").unwrap(), "c/");
        assert_eq!(renamed_folder_key("docs/__new__/", "notes").unwrap(), "docs/notes/");
    }

    #[test]
    fn moved_keys() {
        assert_eq!(moved_file_key("a/b.txt", "c/"), "c/b.txt");
        assert_eq!(moved_file_key("b.txt", ""), "b.txt");
        assert_eq!(moved_folder_key("a/b/", "c/").unwrap(), "c/b/");
        assert_eq!(moved_folder_key("a/b/", "").unwrap(), "b/");
    }

    #[test]
    fn moving_folder_into_itself_is_rejected() {
        let err = moved_folder_key("a/", "a/x/").unwrap_err();
        assert!(matches!(err, CoreError::NestedInItself { .. }));
    }

    #[test]
    fn rebase_descendants_only() {
        assert_eq!(rebase("a/b/c/", "a/b/", "z/"), Some("z/c/".to_string()));
        assert_eq!(rebase("a/b/", "a/b/", "z/"), Some("z/".to_string()));
        assert_eq!(rebase("a/bc/", "a/b/", "z/"), None);
    }
}
