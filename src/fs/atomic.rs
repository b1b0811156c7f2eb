//! All-or-nothing file writes.
//!
//! Content is written to a temporary sibling file, synced, then renamed over
//! the target. A failed write never leaves a half-written output behind;
//! outputs written earlier in the same run are kept.
//!
//! On crash a temporary file named `.{filename}.conjure.tmp` may remain next
//! to the target.

use crate::error::{ConjureError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating missing parent directories.
///
/// # Returns
///
/// * `Ok(())` - On successful atomic write
/// * `Err(ConjureError::Write)` - On directory creation, write or rename failure
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ConjureError::Write(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ConjureError::Write(format!("failed to replace '{}': {}", path.display(), e))
    })?;

    Ok(())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ConjureError::Write(format!("'{}' has no file name", target.display()))
        })?;

    Ok(parent.join(format!(".{}.conjure.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        ConjureError::Write(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let result = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = result {
        let _ = fs::remove_file(path);
        return Err(ConjureError::Write(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out.yml");

        atomic_write(&file_path, b"host: localhost").unwrap();

        assert_eq!(fs::read(&file_path).unwrap(), b"host: localhost");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out.yml");
        fs::write(&file_path, "original").unwrap();

        atomic_write(&file_path, b"replaced").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "replaced");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a").join("b").join("out.yml");

        atomic_write(&file_path, b"x").unwrap();
        // Existing directories are fine on a second write.
        atomic_write(&file_path, b"y").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "y");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out.yml");

        atomic_write(&file_path, b"content").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.yml")]);
    }

    #[test]
    fn test_write_into_file_as_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = atomic_write(blocker.join("out.yml"), b"x").unwrap_err();
        assert!(matches!(err, ConjureError::Write(_)));
    }
}
