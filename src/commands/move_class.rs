use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use classmv::defaults;
use classmv::refactor::{self, MoveRequest, MoveResult};
use classmv::report::{Event, Reporter};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct MoveArgs {
    /// Class file to move (.java or .groovy)
    pub source: PathBuf,

    /// New file path, or an existing directory to move into
    pub destination: PathBuf,

    /// Root of the package tree (detected from the source path if omitted)
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Report what would change without touching any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Move through git instead of the file system (not supported)
    #[arg(long)]
    pub git: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum MoveOutput {
    #[serde(rename = "move")]
    Move {
        #[serde(flatten)]
        result: MoveResult,
        dry_run: bool,
        warnings: usize,
        events: Vec<Event>,
    },
}

pub fn run(args: MoveArgs, global: &GlobalArgs) -> CmdResult<MoveOutput> {
    let defaults = defaults::load_defaults();

    // In JSON mode the events travel inside the envelope instead.
    let mut reporter = if global.json {
        Reporter::silent(global.verbose)
    } else {
        Reporter::new(global.verbose)
    };

    let request = MoveRequest {
        source: args.source,
        destination: args.destination,
        base_dir: args.base_dir,
        preview: args.dry_run,
        vcs: args.git,
    };

    let result = refactor::move_class(&request, &defaults, &mut reporter)?;
    let warnings = reporter.warning_count();

    Ok((
        MoveOutput::Move {
            result,
            dry_run: args.dry_run,
            warnings,
            events: reporter.into_events(),
        },
        0,
    ))
}
