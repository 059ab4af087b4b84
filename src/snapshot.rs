use crate::error::{WatermarkError, WatermarkResult};
use chrono::NaiveDateTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const NAME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Folder name for a run started at `started`: 14 digits, sorts by time.
pub fn result_dir_name(started: NaiveDateTime) -> String {
    started.format(NAME_FORMAT).to_string()
}

/// Copies the whole `target` tree into a new `result_parent/name` directory.
///
/// The destination must not exist. A copy that fails halfway is left in
/// place.
pub fn create_snapshot(target: &Path, result_parent: &Path, name: &str) -> WatermarkResult<PathBuf> {
    let destination = result_parent.join(name);
    copy_tree(target, &destination).map_err(|source| WatermarkError::Snapshot {
        source_dir: target.to_path_buf(),
        destination: destination.clone(),
        source,
    })?;
    Ok(destination)
}

fn copy_tree(source: &Path, destination: &Path) -> io::Result<()> {
    fs::create_dir(destination)?;

    for entry in WalkDir::new(source).follow_links(true).min_depth(1) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let dest_path = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &dest_path)?;
        }
    }

    Ok(())
}
