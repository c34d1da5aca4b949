//! Reads command-line paths into raw submission candidates.

use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::engine_warn;
use lens_core::{RawFile, MAX_FILE_BYTES};

#[derive(Debug)]
pub struct Unreadable {
    pub path: PathBuf,
    pub reason: String,
}

/// Reads every path once. Unreadable paths are reported, not fatal.
/// Files over the per-file limit are sized from metadata and never loaded.
pub fn read_files(paths: &[PathBuf]) -> (Vec<RawFile>, Vec<Unreadable>) {
    let mut files = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();
    for path in paths {
        match read_one(path) {
            Ok(file) => files.push(file),
            Err(err) => {
                engine_warn!("Cannot read {:?}: {}", path, err);
                unreadable.push(Unreadable {
                    path: path.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    (files, unreadable)
}

fn read_one(path: &Path) -> std::io::Result<RawFile> {
    let name = display_name(path);
    let content_type = declared_content_type(path);
    let len = fs::metadata(path)?.len();
    if len > MAX_FILE_BYTES {
        return Ok(RawFile::oversized(name, content_type, len));
    }
    Ok(RawFile::new(name, content_type, fs::read(path)?))
}

/// Content type as a file picker would declare it: guessed from the
/// extension, empty when unknown.
fn declared_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use lens_core::{normalize, ProblemReason, MAX_FILE_BYTES};

    use super::read_files;

    #[test]
    fn reads_files_in_order_and_reports_missing() {
        let temp = TempDir::new().unwrap();
        let png = temp.path().join("shot.png");
        let odd = temp.path().join("blob.zzzunknown");
        fs::write(&png, b"png").unwrap();
        fs::write(&odd, b"odd").unwrap();
        let missing = temp.path().join("missing.jpg");

        let (files, unreadable) = read_files(&[odd.clone(), missing.clone(), png.clone()]);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "blob.zzzunknown");
        assert_eq!(files[0].content_type, "");
        assert_eq!(files[1].name, "shot.png");
        assert_eq!(files[1].content_type, "image/png");
        assert_eq!(files[1].bytes, b"png");
        assert_eq!(unreadable.len(), 1);
        assert_eq!(unreadable[0].path, missing);
    }

    #[test]
    fn oversized_file_is_sized_without_loading() {
        let temp = TempDir::new().unwrap();
        let big = temp.path().join("huge.png");
        let file = fs::File::create(&big).unwrap();
        file.set_len(MAX_FILE_BYTES + 1).unwrap();
        drop(file);

        let (files, unreadable) = read_files(&[big]);

        assert!(unreadable.is_empty());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].byte_len(), MAX_FILE_BYTES + 1);
        assert!(files[0].bytes.is_empty());

        let mut next_id = 1;
        let normalized = normalize(files, &mut next_id).unwrap();
        assert!(normalized.items.is_empty());
        let problems = normalized.warning.unwrap().problems;
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].name, "huge.png");
        assert_eq!(
            problems[0].reason,
            ProblemReason::TooLarge {
                byte_len: MAX_FILE_BYTES + 1
            }
        );
    }
}
