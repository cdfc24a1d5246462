//! Lexical path helpers.

use std::path::{Component, Path, PathBuf};

/// Absolute, lexically normalized form of `path`.
///
/// Relative paths are resolved against the current directory; `.` and `..`
/// are folded without touching the file system, so paths that do not exist
/// yet normalize the same way as existing ones.
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Render `path` relative to `base` for messages, falling back to the full path.
pub fn display_relative(path: &Path, base: &Path) -> String {
    let path = normalize(path);
    let base = normalize(base);
    path.strip_prefix(&base)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}
