//! Project-wide import rewriting after a class has moved.

use serde::Serialize;
use std::path::Path;

use crate::classname::matchers::match_import;
use crate::classname::{CanonicalClass, ClassResolver, Dialect, FileClassInfo, Freshness};
use crate::defaults::Defaults;
use crate::error::{Error, Result};
use crate::report::{Event, Reporter, WarningKind};
use crate::utils::io::{self, LineOutput};
use crate::utils::path::display_relative;
use crate::utils::walk::collect_files;

use super::relocate::MovePlan;

/// One file whose imports were (or in preview, would be) rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedFile {
    pub path: String,
    pub lines: usize,
}

/// Whether a file's location and contents name the same class.
///
/// Lenient dialects only require the packages to agree.
pub fn identities_agree(
    dialect: Dialect,
    location: &CanonicalClass,
    contents: &CanonicalClass,
) -> bool {
    if dialect.strict_file_naming() {
        location == contents
    } else {
        location.package() == contents.package()
    }
}

/// Rewrite every import of `plan.from` under the base to `plan.to`.
///
/// Files that cannot be scanned are reported and skipped. Any other error
/// aborts the walk; files already rewritten stay rewritten.
pub fn propagate(
    plan: &MovePlan,
    resolver: &mut ClassResolver,
    defaults: &Defaults,
    preview: bool,
    reporter: &mut Reporter,
) -> Result<Vec<UpdatedFile>> {
    let mut updated = Vec::new();
    if plan.from == plan.to {
        return Ok(updated);
    }

    let files = collect_files(&plan.base, &defaults.skip_dirs, |path| {
        Dialect::from_path(path).is_some()
    });
    log_status!("imports", "Scanning {} source files", files.len());

    for file in files {
        // In preview the moved file still sits at its old path.
        if preview && file == plan.source {
            continue;
        }
        let shown = display_relative(&file, &plan.base);

        let contents = match resolver.from_contents(&file, Freshness::Fresh) {
            Ok(info) => info,
            Err(err) if err.code.is_skippable() => {
                reporter.warn(WarningKind::MalformedSource, Some(shown), skip_reason(&err));
                continue;
            }
            Err(err) => return Err(err),
        };

        check_consistency(&file, &contents, resolver, reporter, &shown);

        if !contents.imports_class(&plan.from) {
            continue;
        }

        let lines = rewrite_imports(&file, &plan.from, &plan.to, preview)?;
        updated.extend(record_rewrite(plan, shown, lines, reporter));
    }

    Ok(updated)
}

/// Report the rewrite of a file known to import `plan.from`.
fn record_rewrite(
    plan: &MovePlan,
    shown: String,
    lines: usize,
    reporter: &mut Reporter,
) -> Option<UpdatedFile> {
    if lines == 0 {
        reporter.warn(
            WarningKind::ImportNotRewritten,
            Some(shown),
            format!("imports {} but no import line could be rewritten", plan.from),
        );
        return None;
    }

    reporter.emit(Event::ImportsUpdated {
        file: shown.clone(),
        from: plan.from.clone(),
        to: plan.to.clone(),
        lines,
    });
    Some(UpdatedFile { path: shown, lines })
}

fn skip_reason(err: &Error) -> String {
    let rule = err.details.get("rule").and_then(|r| r.as_str());
    let line = err.details.get("line").and_then(|l| l.as_u64());
    match (rule, line) {
        (Some(rule), Some(line)) => format!("skipped, malformed {} at line {}", rule, line),
        (Some(rule), None) => format!("skipped, {}", rule),
        _ => format!("skipped, {}", err.message),
    }
}

fn check_consistency(
    file: &Path,
    contents: &FileClassInfo,
    resolver: &mut ClassResolver,
    reporter: &mut Reporter,
    shown: &str,
) {
    let Some(dialect) = Dialect::from_path(file) else {
        return;
    };
    // A file whose location names no valid class has nothing to compare.
    let Ok(location) = resolver.from_location(file, Freshness::Fresh) else {
        return;
    };
    if !identities_agree(dialect, &location.class, &contents.class) {
        reporter.warn(
            WarningKind::IdentityMismatch,
            Some(shown.to_string()),
            format!(
                "declares {} but is located as {}",
                contents.class, location.class
            ),
        );
    }
}

/// Point every import of `from` in `path` at `to`, keeping static member
/// suffixes, aliases and trailing text. Returns the number of lines changed.
pub fn rewrite_imports(
    path: &Path,
    from: &CanonicalClass,
    to: &CanonicalClass,
    preview: bool,
) -> Result<usize> {
    let replacement = to.qualified_name();
    let outcome = io::rewrite_lines(path, preview, |line| {
        let Some(import) = match_import(line) else {
            return LineOutput::Keep;
        };
        match import.imported_class() {
            Ok((class, suffix)) if &class == from => {
                let head = import.head(&format!("{}{}", replacement, suffix));
                LineOutput::splice(line, import.tail, head)
            }
            _ => LineOutput::Keep,
        }
    })?;
    Ok(outcome.replaced_lines)
}
