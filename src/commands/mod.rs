pub type CmdResult<T> = classmv::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub verbose: bool,
    /// Machine-readable envelope instead of streamed progress lines.
    pub json: bool,
}

pub mod inspect;
pub mod move_class;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (classmv::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Move(args) => dispatch!(args, global, move_class),
        crate::Commands::Inspect(args) => dispatch!(args, global, inspect),
    }
}
