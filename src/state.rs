//! 4.L Shell state — the single mutable record threaded through the
//! pipeline driver, the stage executor, and every builtin handler.

use crate::history::HistoryStore;

pub struct ShellState {
    pub history: HistoryStore,
    /// Exit status of the most recently completed pipeline.
    pub last_status: i32,
}

impl ShellState {
    pub fn new() -> Self {
        let mut history = HistoryStore::new();
        history.load_startup_histfile();
        Self {
            history,
            last_status: 0,
        }
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_zero_status_and_empty_history() {
        std::env::remove_var("HISTFILE");
        let state = ShellState::new();
        assert_eq!(state.last_status, 0);
        assert_eq!(state.history.len(), 0);
    }
}
