use std::path::{Path, PathBuf};

use crate::defaults::Defaults;
use crate::error::{Error, Result};
use crate::report::{Reporter, WarningKind};
use crate::utils::path::normalize;

/// Nearest ancestor of `source` whose name is one of `markers`.
///
/// At most `max_ascent` directories are inspected, starting with the
/// directory that contains `source`.
pub fn detect_base_dir(source: &Path, markers: &[String], max_ascent: usize) -> Option<PathBuf> {
    let source = normalize(source);
    source
        .parent()?
        .ancestors()
        .take(max_ascent)
        .find(|dir| {
            dir.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| markers.iter().any(|m| m == name))
        })
        .map(Path::to_path_buf)
}

/// The explicit base if given, else the detected one.
///
/// Failing to detect only warns; the missing base is then reported as a
/// missing argument, because every later path computation needs it.
pub fn resolve_base_dir(
    explicit: Option<&Path>,
    source: &Path,
    defaults: &Defaults,
    reporter: &mut Reporter,
) -> Result<PathBuf> {
    if let Some(base) = explicit {
        if !base.is_dir() {
            return Err(Error::validation_invalid_argument(
                "base-dir",
                "Base directory does not exist",
                Some(base.display().to_string()),
            ));
        }
        return Ok(normalize(base));
    }

    if let Some(base) = detect_base_dir(source, &defaults.base_markers, defaults.max_ascent) {
        log_status!("move", "Using base directory {}", base.display());
        return Ok(base);
    }

    reporter.warn(
        WarningKind::BaseDirNotFound,
        Some(source.display().to_string()),
        format!(
            "no ancestor directory named {} within {} levels",
            defaults.base_markers.join(" or "),
            defaults.max_ascent
        ),
    );

    Err(Error::validation_missing_argument(vec!["base-dir".to_string()])
        .with_hint("Pass --base-dir pointing at the root of the package tree"))
}
