//! Output path resolution for variants.

use crate::chain::InheritanceChain;
use crate::engine::Variant;
use crate::error::{ConjureError, Result};
use std::path::{Component, Path, PathBuf};

/// Directory used when a variant has no tag, or its tag has no registration.
const CURRENT_DIR: &str = ".";

/// Compute where `variant` is written.
///
/// Tagged variants go to the directory registered for their tag anywhere in
/// the chain; untagged ones, and tags without a registration, go to `.`.
/// Percent-escapes in the joined path are decoded, so file names may carry
/// URL-escaped characters.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The output path, relative paths being relative to the output root
/// * `Err(ConjureError::Path)` - The path normalizes to empty or `.`, or does
///   not end in a file name
pub fn resolve_path(chain: &InheritanceChain, variant: &Variant) -> Result<PathBuf> {
    let dir = if variant.tag.is_empty() {
        CURRENT_DIR
    } else {
        chain.tag_search(&variant.tag).unwrap_or(CURRENT_DIR)
    };

    let joined = join(dir, &variant.base_name);
    let decoded = urlencoding::decode(&joined).map_err(|e| {
        ConjureError::Path(format!(
            "output path '{}' for file `{}` is not valid UTF-8 once decoded: {}",
            joined, variant.file_id, e
        ))
    })?;

    if !names_a_file(&decoded) || variant.base_name.trim().is_empty() {
        return Err(ConjureError::Path(format!(
            "the output for file `{}` resolves to '{}', which is not a file path",
            variant.file_id, decoded
        )));
    }

    Ok(PathBuf::from(decoded.into_owned()))
}

/// False for paths made only of `.` segments (`""`, `.`, `./.`, `././`) and
/// for paths whose last segment is empty or `.`.
fn names_a_file(path: &str) -> bool {
    let only_current_dir = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::CurDir));
    let last_segment = path.rsplit('/').next().unwrap_or_default();

    !only_current_dir && !matches!(last_segment, "" | ".")
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainBuilder;
    use crate::document::DocumentFormat;
    use tempfile::TempDir;

    fn chain_with_tags(tags_yaml: &str) -> (TempDir, InheritanceChain) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conjure.yml");
        std::fs::write(&path, format!("files: []\ngroups: []\ntags:\n{}", tags_yaml)).unwrap();
        let chain = ChainBuilder::new(DocumentFormat::Yaml).load(&path).unwrap();
        (temp_dir, chain)
    }

    fn variant(tag: &str, base_name: &str) -> Variant {
        Variant {
            file_id: "cfg".to_string(),
            tag: tag.to_string(),
            base_name: base_name.to_string(),
            bytes: Vec::new(),
        }
    }

    #[test]
    fn test_untagged_goes_to_current_dir() {
        let (_dir, chain) = chain_with_tags("  - id: prod\n    path: /etc/app/\n");
        let path = resolve_path(&chain, &variant("", "app.yml")).unwrap();
        assert_eq!(path, PathBuf::from("./app.yml"));
    }

    #[test]
    fn test_tagged_uses_registered_directory() {
        let (_dir, chain) = chain_with_tags("  - id: prod\n    path: /etc/app/\n");
        let path = resolve_path(&chain, &variant("prod", "app.yml")).unwrap();
        assert_eq!(path, PathBuf::from("/etc/app/app.yml"));
    }

    #[test]
    fn test_directory_without_trailing_slash() {
        let (_dir, chain) = chain_with_tags("  - id: prod\n    path: out/prod\n");
        let path = resolve_path(&chain, &variant("prod", "app.yml")).unwrap();
        assert_eq!(path, PathBuf::from("out/prod/app.yml"));
    }

    #[test]
    fn test_unregistered_tag_defaults_to_current_dir() {
        let (_dir, chain) = chain_with_tags("  - id: prod\n    path: /etc/app/\n");
        let path = resolve_path(&chain, &variant("qa", "app.yml")).unwrap();
        assert_eq!(path, PathBuf::from("./app.yml"));
    }

    #[test]
    fn test_percent_escapes_are_decoded() {
        let (_dir, chain) = chain_with_tags("  - id: prod\n    path: out/\n");
        let path = resolve_path(&chain, &variant("prod", "my%20app.yml")).unwrap();
        assert_eq!(path, PathBuf::from("out/my app.yml"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let (_dir, chain) = chain_with_tags("  - id: prod\n    path: out/\n");

        for v in [variant("", ""), variant("prod", ""), variant("", "   ")] {
            match resolve_path(&chain, &v).unwrap_err() {
                ConjureError::Path(msg) => assert!(msg.contains("`cfg`")),
                other => panic!("expected path error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_dot_outputs_are_rejected() {
        let (_dir, chain) = chain_with_tags("  - id: dev\n    path: out/\n");

        for v in [
            variant("", "."),
            variant("", "./"),
            variant("", "./."),
            variant("", "%2E"),
            variant("dev", "."),
            variant("dev", "./"),
            variant("qa", "."),
        ] {
            match resolve_path(&chain, &v).unwrap_err() {
                ConjureError::Path(msg) => assert!(msg.contains("`cfg`"), "{msg}"),
                other => panic!("expected path error for {:?}, got {other:?}", v.base_name),
            }
        }
    }

    #[test]
    fn test_names_a_file() {
        assert!(names_a_file("./app.yml"));
        assert!(names_a_file("out/.env"));
        assert!(!names_a_file(""));
        assert!(!names_a_file("."));
        assert!(!names_a_file("./."));
        assert!(!names_a_file("././"));
        assert!(!names_a_file("out/."));
        assert!(!names_a_file("out/"));
    }

    #[test]
    fn test_join() {
        assert_eq!(join(".", "a"), "./a");
        assert_eq!(join("out/", "a"), "out/a");
        assert_eq!(join("out", "a"), "out/a");
        assert_eq!(join("", "a"), "a");
    }
}
