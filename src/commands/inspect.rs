use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use classmv::defaults;
use classmv::refactor::{self, FileInspection};
use classmv::report::Reporter;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct InspectArgs {
    /// Source files to inspect
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Root of the package tree (detected per file if omitted)
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum InspectOutput {
    #[serde(rename = "inspect")]
    Inspect { files: Vec<FileInspection> },
}

pub fn run(args: InspectArgs, global: &GlobalArgs) -> CmdResult<InspectOutput> {
    let defaults = defaults::load_defaults();
    let mut reporter = if global.json {
        Reporter::silent(global.verbose)
    } else {
        Reporter::new(global.verbose)
    };

    let mut files = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let report =
            refactor::inspect_file(file, args.base_dir.as_deref(), &defaults, &mut reporter)?;
        if !global.json {
            print!("{}", render_text(&report));
        }
        files.push(report);
    }

    Ok((InspectOutput::Inspect { files }, 0))
}

fn render_text(report: &FileInspection) -> String {
    let show = |class: &Option<classmv::classname::CanonicalClass>| {
        class
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let verdict = match report.consistent {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };

    let mut out = format!("{}\n", report.path);
    out.push_str(&format!("  location:   {}\n", show(&report.location)));
    out.push_str(&format!("  contents:   {}\n", show(&report.contents)));
    for import in &report.imports {
        out.push_str(&format!("  import:     {}\n", import));
    }
    out.push_str(&format!("  consistent: {}\n", verdict));
    for problem in &report.problems {
        out.push_str(&format!("  problem:    {}\n", problem));
    }
    out
}
