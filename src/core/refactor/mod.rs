//! Moving a class and everything that has to follow it.
//!
//! A move runs in a fixed order: path preconditions, base directory,
//! identities, the move itself, then import propagation. Nothing touches the
//! tree before the last precondition has passed.

mod base;
mod imports;
mod inspect;
mod relocate;

pub use base::{detect_base_dir, resolve_base_dir};
pub use imports::{identities_agree, propagate, rewrite_imports, UpdatedFile};
pub use inspect::{inspect_file, FileInspection};
pub use relocate::{
    check_preconditions, execute_move, plan_move, rewrite_declarations, CheckedPaths, MovePlan,
    MoveRequest,
};

use serde::Serialize;

use crate::classname::{CanonicalClass, ClassResolver};
use crate::defaults::Defaults;
use crate::error::Result;
use crate::report::Reporter;
use crate::utils::path::display_relative;

#[derive(Debug, Clone, Serialize)]
pub struct MoveResult {
    pub from: CanonicalClass,
    pub to: CanonicalClass,
    pub from_path: String,
    pub to_path: String,
    pub base: String,
    /// False in preview mode.
    pub applied: bool,
    pub updated_files: Vec<UpdatedFile>,
}

/// Move one class file and rewrite every import of it under the base.
pub fn move_class(
    request: &MoveRequest,
    defaults: &Defaults,
    reporter: &mut Reporter,
) -> Result<MoveResult> {
    let paths = check_preconditions(request)?;
    if request.preview {
        log_status!("move", "Dry run, no files will be changed");
    }
    let base = resolve_base_dir(request.base_dir.as_deref(), &paths.source, defaults, reporter)?;

    let mut resolver = ClassResolver::new(&base);
    let plan = plan_move(paths, &mut resolver)?;

    execute_move(&plan, request.preview, reporter)?;
    let updated_files = propagate(&plan, &mut resolver, defaults, request.preview, reporter)?;

    Ok(MoveResult {
        from_path: display_relative(&plan.source, &plan.base),
        to_path: display_relative(&plan.target, &plan.base),
        base: plan.base.display().to_string(),
        applied: !request.preview,
        from: plan.from,
        to: plan.to,
        updated_files,
    })
}
