//! Moving one class: precondition checks, declaration rewrite, relocation.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::classname::matchers::{match_package, match_type_declaration};
use crate::classname::{CanonicalClass, ClassResolver, Dialect, Freshness};
use crate::error::{DialectMismatchDetails, Error, Result};
use crate::report::{Event, Reporter};
use crate::utils::io::{self, LineOutput};
use crate::utils::path::{display_relative, normalize};

/// What the user asked for, before any validation.
#[derive(Debug, Clone, Default)]
pub struct MoveRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub base_dir: Option<PathBuf>,
    pub preview: bool,
    /// Version-control-aware move. Not implemented; rejected up front.
    pub vcs: bool,
}

/// Source and destination after the path-level preconditions passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedPaths {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub dialect: Dialect,
}

/// A fully validated move.
#[derive(Debug, Clone, Serialize)]
pub struct MovePlan {
    pub base: PathBuf,
    pub source: PathBuf,
    pub target: PathBuf,
    pub dialect: Dialect,
    pub from: CanonicalClass,
    pub to: CanonicalClass,
}

/// Path-level preconditions. Nothing is read or written.
pub fn check_preconditions(request: &MoveRequest) -> Result<CheckedPaths> {
    if request.vcs {
        return Err(Error::move_unsupported("git"));
    }

    let source = normalize(&request.source);
    let shown_source = request.source.display().to_string();

    if !source.exists() {
        return Err(Error::move_source_not_found(shown_source));
    }
    if !source.is_file() {
        return Err(Error::move_source_not_file(shown_source));
    }

    let dialect = Dialect::from_path(&source).ok_or_else(|| {
        Error::validation_invalid_argument(
            "source",
            "Source is not a .java or .groovy file",
            Some(shown_source.clone()),
        )
    })?;

    let mut destination = normalize(&request.destination);
    if destination.is_dir() {
        let file_name = source
            .file_name()
            .ok_or_else(|| Error::move_source_not_file(shown_source.clone()))?;
        destination = destination.join(file_name);
    }
    if destination.exists() {
        return Err(Error::move_destination_exists(destination.display().to_string()));
    }

    let destination_extension = destination
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_string);
    if destination_extension.as_deref() != Some(dialect.extension()) {
        return Err(Error::move_dialect_mismatch(DialectMismatchDetails {
            source: shown_source,
            destination: destination.display().to_string(),
            source_extension: dialect.extension().to_string(),
            destination_extension,
        }));
    }

    Ok(CheckedPaths {
        source,
        destination,
        dialect,
    })
}

/// Resolve both class identities. The source must be well-formed.
pub fn plan_move(paths: CheckedPaths, resolver: &mut ClassResolver) -> Result<MovePlan> {
    let from = resolver
        .from_contents(&paths.source, Freshness::Cached)?
        .class;
    let to = resolver
        .from_location(&paths.destination, Freshness::Cached)?
        .class;

    let base = resolver.base().to_path_buf();
    let target = base.join(to.relative_path(paths.dialect.extension()));

    Ok(MovePlan {
        base,
        source: paths.source,
        target,
        dialect: paths.dialect,
        from,
        to,
    })
}

/// Rewrite the source's package and first type declaration to the
/// destination identity, then move it to the destination path.
///
/// The rewrite is counted in preview first. A source where either line
/// cannot be rewritten is left in place untouched.
pub fn execute_move(plan: &MovePlan, preview: bool, reporter: &mut Reporter) -> Result<()> {
    let planned = rewrite_declarations(&plan.source, &plan.to, true)?;
    if planned < 2 {
        return Err(Error::internal_unexpected(format!(
            "Rewrote {} of 2 declaration lines in {}",
            planned,
            plan.source.display()
        )));
    }

    if !preview {
        rewrite_declarations(&plan.source, &plan.to, false)?;
        io::relocate(&plan.source, &plan.target)?;
    }

    reporter.emit(Event::Moved {
        from: plan.from.clone(),
        to: plan.to.clone(),
        from_path: display_relative(&plan.source, &plan.base),
        to_path: display_relative(&plan.target, &plan.base),
    });

    Ok(())
}

/// Swap the first package name and first declared type name in `path`.
pub fn rewrite_declarations(path: &Path, to: &CanonicalClass, preview: bool) -> Result<usize> {
    let mut package_done = false;
    let mut declaration_done = false;

    let outcome = io::rewrite_lines(path, preview, |line| {
        if !package_done {
            if let Some(package) = match_package(line) {
                package_done = true;
                return LineOutput::splice(line, package.tail, package.head(to.package()));
            }
        }
        if !declaration_done {
            if let Some(declaration) = match_type_declaration(line) {
                declaration_done = true;
                let head = declaration.head(to.simple_name());
                return LineOutput::splice(line, declaration.tail, head);
            }
        }
        LineOutput::Keep
    })?;

    Ok(outcome.replaced_lines)
}
