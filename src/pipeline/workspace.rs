use crate::error::{ChaosGrabError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The root directory that owns one subdirectory per index entry.
///
/// Subdirectory names are taken verbatim from entry names, so entries with
/// colliding names write into the same directory and the last writer wins.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create the workspace root, idempotently.
    ///
    /// Existing content is never touched; failure here is fatal because no
    /// later stage can proceed without the root directory.
    pub fn init<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();

        fs::create_dir_all(&root).map_err(|e| ChaosGrabError::Workspace {
            path: root.clone(),
            source: e,
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("workspace");

        let workspace = Workspace::init(&root).unwrap();
        assert!(workspace.root().is_dir());
    }

    #[test]
    fn test_init_is_idempotent_and_preserves_content() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("workspace");

        Workspace::init(&root).unwrap();
        fs::write(root.join("existing.txt"), "keep me").unwrap();

        let workspace = Workspace::init(&root).unwrap();
        assert!(workspace.root().is_dir());
        assert_eq!(fs::read_to_string(root.join("existing.txt")).unwrap(), "keep me");
    }

    #[test]
    fn test_entry_dir_is_literal_join() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::init(temp_dir.path()).unwrap();

        assert_eq!(
            workspace.entry_dir("example-program"),
            temp_dir.path().join("example-program")
        );
        // Colliding names resolve to the same directory.
        assert_eq!(workspace.entry_dir("dup"), workspace.entry_dir("dup"));
    }

    #[test]
    fn test_init_fails_when_root_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = Workspace::init(&blocker);
        assert!(matches!(result, Err(ChaosGrabError::Workspace { .. })));
    }
}
