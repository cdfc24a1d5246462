//! Read-only report of how a file's identity derives both ways.

use serde::Serialize;
use std::path::Path;

use crate::classname::{CanonicalClass, ClassResolver, Dialect, Freshness};
use crate::defaults::Defaults;
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::utils::path::{display_relative, normalize};

use super::base::resolve_base_dir;
use super::imports::identities_agree;

#[derive(Debug, Clone, Serialize)]
pub struct FileInspection {
    pub path: String,
    pub base: String,
    pub dialect: Dialect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<CanonicalClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<CanonicalClass>,
    pub imports: Vec<CanonicalClass>,
    /// `None` when either side could not be derived.
    pub consistent: Option<bool>,
    pub problems: Vec<String>,
}

pub fn inspect_file(
    path: &Path,
    base_dir: Option<&Path>,
    defaults: &Defaults,
    reporter: &mut Reporter,
) -> Result<FileInspection> {
    let shown = path.display().to_string();
    let absolute = normalize(path);
    if !absolute.exists() {
        return Err(Error::move_source_not_found(shown));
    }
    if !absolute.is_file() {
        return Err(Error::move_source_not_file(shown));
    }
    let dialect = Dialect::from_path(&absolute).ok_or_else(|| {
        Error::validation_invalid_argument(
            "file",
            "File is not a .java or .groovy file",
            Some(shown.clone()),
        )
    })?;

    let base = resolve_base_dir(base_dir, &absolute, defaults, reporter)?;
    let mut resolver = ClassResolver::new(&base);
    let mut problems = Vec::new();

    let location = match resolver.from_location(&absolute, Freshness::Cached) {
        Ok(info) => Some(info.class),
        Err(err) if err.code.is_skippable() => {
            problems.push(err.message);
            None
        }
        Err(err) => return Err(err),
    };

    let (contents, imports) = match resolver.from_contents(&absolute, Freshness::Cached) {
        Ok(info) => (Some(info.class), info.imports),
        Err(err) if err.code.is_skippable() => {
            problems.push(err.message);
            (None, Vec::new())
        }
        Err(err) => return Err(err),
    };

    let consistent = match (&location, &contents) {
        (Some(l), Some(c)) => Some(identities_agree(dialect, l, c)),
        _ => None,
    };

    Ok(FileInspection {
        path: display_relative(&absolute, &base),
        base: base.display().to_string(),
        dialect,
        location,
        contents,
        imports,
        consistent,
        problems,
    })
}
