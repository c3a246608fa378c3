use crate::error::{ChaosGrabError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Unpacks a downloaded ZIP archive beneath a destination directory.
pub struct ZipExtractor;

impl ZipExtractor {
    /// Extract every entry of `archive_path` under `dest`.
    ///
    /// Directory entries are created idempotently; file entries get their
    /// parent directories created, then their decompressed content streamed
    /// to the corresponding relative path, truncating any pre-existing file.
    /// The archive-declared unix mode is applied where present.
    ///
    /// Entries whose stored path would escape `dest` (parent-directory
    /// segments, absolute paths) abort extraction with an error naming the
    /// offending path. Files already written before a failure are left in
    /// place; there is no rollback.
    ///
    /// Returns the extracted file paths in archive order.
    pub fn extract(archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dest).map_err(ChaosGrabError::Io)?;

        let file = fs::File::open(archive_path).map_err(ChaosGrabError::Io)?;
        let mut archive = zip::ZipArchive::new(file).map_err(|e| ChaosGrabError::Archive {
            message: format!("failed to open {}: {}", archive_path.display(), e),
        })?;

        let mut extracted_files = Vec::new();

        for i in 0..archive.len() {
            let entry = archive.by_index(i).map_err(|e| ChaosGrabError::Archive {
                message: format!("failed to read entry {} of {}: {}", i, archive_path.display(), e),
            })?;

            if let Some(file_path) = Self::extract_entry(entry, dest)? {
                extracted_files.push(file_path);
            }
        }

        Ok(extracted_files)
    }

    fn extract_entry(mut entry: zip::read::ZipFile, dest: &Path) -> Result<Option<PathBuf>> {
        // enclosed_name() rejects parent-dir segments and absolute paths.
        let relative_path = match entry.enclosed_name() {
            Some(path) => path.to_path_buf(),
            None => {
                return Err(ChaosGrabError::UnsafeArchivePath {
                    path: entry.name().to_string(),
                })
            }
        };

        let out_path = dest.join(relative_path);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(ChaosGrabError::Io)?;
            return Ok(None);
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(ChaosGrabError::Io)?;
        }

        let mut out_file = fs::File::create(&out_path).map_err(ChaosGrabError::Io)?;
        std::io::copy(&mut entry, &mut out_file).map_err(ChaosGrabError::Io)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                .map_err(ChaosGrabError::Io)?;
        }

        Ok(Some(out_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::write::FileOptions;

    fn write_test_archive(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().unix_permissions(0o644);

        for (name, content) in entries {
            match content {
                Some(bytes) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(bytes).unwrap();
                }
                None => {
                    writer.add_directory(*name, options).unwrap();
                }
            }
        }

        writer.finish().unwrap().into_inner()
    }

    fn write_archive_file(dir: &Path, bytes: &[u8]) -> PathBuf {
        let path = dir.join("test.zip");
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_extraction_preserves_nested_structure() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");

        let bytes = write_test_archive(&[
            ("subdomains.txt", Some(b"a.example.com\nb.example.com\n" as &[u8])),
            ("nested/", None),
            ("nested/deep/more.txt", Some(b"c.example.com\n")),
        ]);
        let archive_path = write_archive_file(temp_dir.path(), &bytes);

        let extracted = ZipExtractor::extract(&archive_path, &dest).unwrap();

        assert_eq!(extracted.len(), 2);
        assert_eq!(
            fs::read(dest.join("subdomains.txt")).unwrap(),
            b"a.example.com\nb.example.com\n"
        );
        assert!(dest.join("nested").is_dir());
        assert_eq!(
            fs::read(dest.join("nested/deep/more.txt")).unwrap(),
            b"c.example.com\n"
        );
    }

    #[test]
    fn test_extraction_truncates_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("subdomains.txt"), "stale content that is longer").unwrap();

        let bytes = write_test_archive(&[("subdomains.txt", Some(b"fresh\n" as &[u8]))]);
        let archive_path = write_archive_file(temp_dir.path(), &bytes);

        ZipExtractor::extract(&archive_path, &dest).unwrap();

        assert_eq!(fs::read(dest.join("subdomains.txt")).unwrap(), b"fresh\n");
    }

    #[test]
    fn test_traversal_entry_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");

        let bytes = write_test_archive(&[("../escape.txt", Some(b"nope" as &[u8]))]);
        let archive_path = write_archive_file(temp_dir.path(), &bytes);

        let result = ZipExtractor::extract(&archive_path, &dest);
        assert!(matches!(
            result,
            Err(ChaosGrabError::UnsafeArchivePath { .. })
        ));
        assert!(!temp_dir.path().join("escape.txt").exists());
    }

    #[test]
    fn test_garbage_archive_fails_to_open() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");
        let archive_path = write_archive_file(temp_dir.path(), b"this is not a zip file");

        let result = ZipExtractor::extract(&archive_path, &dest);
        assert!(matches!(result, Err(ChaosGrabError::Archive { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_mode_is_applied() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().unix_permissions(0o755);
        writer.start_file("run.sh", options).unwrap();
        writer.write_all(b"#!/bin/sh\n").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let archive_path = write_archive_file(temp_dir.path(), &bytes);
        ZipExtractor::extract(&archive_path, &dest).unwrap();

        let mode = fs::metadata(dest.join("run.sh")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
