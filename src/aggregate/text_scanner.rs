use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovers the text files to aggregate beneath a root directory.
///
/// The walk is depth-first with entries in each directory sorted by file
/// name, so the discovery order is a documented contract: it depends only on
/// the filesystem content, never on directory-listing order.
pub struct TextScanner {
    suffix: String,
}

impl TextScanner {
    pub fn new<S: Into<String>>(suffix: S) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn scan(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }

            let matches_suffix = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(&self.suffix));

            if matches_suffix {
                files.push(entry.path().to_path_buf());
            }
        }

        files
    }
}
