use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;

use commands::{inspect, move_class};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "classmv")]
#[command(version = VERSION)]
#[command(about = "Move and rename Java/Groovy classes, rewriting imports project-wide")]
struct Cli {
    /// Name the classes on progress lines and show warnings
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print a JSON envelope instead of progress lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move or rename a class file and update every import of it
    #[command(visible_alias = "mv")]
    Move(move_class::MoveArgs),
    /// Show how a file's class identity derives from its path and its contents
    Inspect(inspect::InspectArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        verbose: cli.verbose,
        json: cli.json,
    };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if global.json {
        if let Err(err) = output::print_json_result(json_result) {
            output::print_error_text(&err);
            return std::process::ExitCode::from(1);
        }
    } else if let Err(err) = json_result {
        output::print_error_text(&err);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
