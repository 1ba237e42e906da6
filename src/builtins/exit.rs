use super::{Builtin, BuiltinRegistry};
use crate::editor::terminal;
use crate::state::ShellState;

pub struct ExitBuiltin;

impl Builtin for ExitBuiltin {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn run(&self, argv: &[Vec<u8>], state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let code = argv
            .get(1)
            .and_then(|a| std::str::from_utf8(a).ok())
            .and_then(|s| s.parse::<i32>().ok())
            .unwrap_or(0);

        // Runs in whichever process reaches it, so mid-pipeline use
        // tears down the whole pipeline, not just one stage.
        state.history.flush_on_exit();
        terminal::restore();
        std::process::exit(code);
    }
}
