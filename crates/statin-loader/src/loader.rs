//! Input discovery utilities.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{ExtractError, ExtractResult};

/// Lists the note files directly inside `path`.
///
/// Only regular files are returned, hidden files are ignored, and the list
/// is sorted by file name so every run traverses notes in the same order.
pub fn discover_note_files<P: AsRef<Path>>(path: P) -> ExtractResult<Vec<PathBuf>> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(ExtractError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        files.push(entry.path());
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
