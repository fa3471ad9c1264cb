//! Write the finished changelog to disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ChangelogError;

/// Write `content` to `path`, replacing any existing file.
///
/// The text goes to a temporary file in the same directory first and is
/// renamed into place, so readers never see a half-written changelog.
pub fn write_changelog(path: &Path, content: &str) -> Result<(), ChangelogError> {
    let failed = |source| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(failed)?;
    file.write_all(content.as_bytes()).map_err(failed)?;
    file.flush().map_err(failed)?;
    file.persist(path).map_err(|e| failed(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGELOG.md");

        write_changelog(&path, "# Changelog\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Changelog\n");
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "old content that is longer").unwrap();

        write_changelog(&path, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("CHANGELOG.md");

        let result = write_changelog(&path, "x");
        assert!(matches!(result, Err(ChangelogError::WriteFailed { .. })));
    }
}
