use crate::error::{WatermarkError, WatermarkResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every regular file under `root`, depth-first, entries sorted by name
/// within each directory.
pub fn collect_files(root: &Path) -> WatermarkResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|source| WatermarkError::Enumerate {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
