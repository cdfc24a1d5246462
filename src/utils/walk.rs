//! Deterministic source-file enumeration.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every regular file under `root` accepted by `keep`, in file-name order.
///
/// Directories named in `skip_dirs` are not entered at any depth. Unreadable
/// entries are skipped. The list is collected up front so callers can move
/// or rewrite files without disturbing the iteration.
pub fn collect_files<F>(root: &Path, skip_dirs: &[String], keep: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !skip_dirs
                    .iter()
                    .any(|skip| entry.file_name().to_str() == Some(skip.as_str()))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && keep(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}
