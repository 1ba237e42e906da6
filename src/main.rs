use crabsh::builtins::BuiltinRegistry;
use crabsh::editor;
use crabsh::editor::terminal;
use crabsh::state::ShellState;

fn main() {
    env_logger::init();

    let mut state = ShellState::new();
    let registry = BuiltinRegistry::default_set();

    log::debug!("starting interactive session, {} history entries loaded", state.history.len());

    editor::run(&mut state, &registry);

    state.history.flush_on_exit();
    terminal::restore();
}
