//! Constants for the native cache and consolidated corpus formats

use std::path::{Component, Path};

/// First line of every native cache entry (version 1 encoding)
pub const ENC_VERSION_1: &str = "go test fuzz v1";

/// Opening of the payload line in a native cache entry
pub const BYTES_PREFIX: &str = "[]byte(";

/// Closing of the payload line in a native cache entry
pub const BYTES_SUFFIX: &str = ")";

/// File extension of consolidated corpus files, without the dot
pub const CORPUS_EXTENSION: &str = "fuzz";

/// Number of hex characters of the SHA-256 digest used as a native entry name
pub const NATIVE_NAME_LEN: usize = 16;

/// Returns the consolidated corpus file name for a target
pub fn corpus_file_name(target: &str) -> String {
    format!("{}.{}", target, CORPUS_EXTENSION)
}

/// Strips the consolidated corpus suffix from a file name.
///
/// Returns `None` for names without the suffix, or when what precedes it is
/// not a valid target name (empty, `.` or `..`).
pub fn target_from_corpus_file(name: &str) -> Option<&str> {
    let target = name.strip_suffix(CORPUS_EXTENSION)?.strip_suffix('.')?;
    is_valid_target_name(target).then_some(target)
}

/// True when `name` can be used as a target: exactly one normal path component
pub fn is_valid_target_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first == name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_file_name() {
        assert_eq!(corpus_file_name("FuzzParse"), "FuzzParse.fuzz");
    }

    #[test]
    fn test_target_from_corpus_file() {
        assert_eq!(target_from_corpus_file("FuzzParse.fuzz"), Some("FuzzParse"));
        assert_eq!(target_from_corpus_file("a.b.fuzz"), Some("a.b"));
        assert_eq!(target_from_corpus_file(".fuzz"), None);
        assert_eq!(target_from_corpus_file("..fuzz"), None);
        assert_eq!(target_from_corpus_file("...fuzz"), None);
        assert_eq!(target_from_corpus_file("....fuzz"), Some("..."));
        assert_eq!(target_from_corpus_file("FuzzParse.fuzzy"), None);
        assert_eq!(target_from_corpus_file("FuzzParsefuzz"), None);
        assert_eq!(target_from_corpus_file("README.md"), None);
    }

    #[test]
    fn test_is_valid_target_name() {
        assert!(is_valid_target_name("FuzzDecodePacket"));
        assert!(is_valid_target_name("Fuzz.v2"));
        assert!(!is_valid_target_name(""));
        assert!(!is_valid_target_name("."));
        assert!(!is_valid_target_name(".."));
        assert!(!is_valid_target_name("a/b"));
        assert!(!is_valid_target_name("a/"));
        assert!(!is_valid_target_name("/abs"));
    }
}
