//! 4.D Built-in registry — name to handler for the fixed built-in set.
//!
//! Grounded on a `commands::registry::CommandRegistry` /
//! `commands::types::Command` pattern (`Command` trait + a
//! `HashMap<name, Box<dyn Command>>`), adapted for synchronous,
//! real-descriptor execution: a builtin here writes straight to fd 1
//! / fd 2 (already wired to the stage's streams by the executor in
//! `exec::mod`), rather than returning captured stdout/stderr strings.

mod cd;
mod cp;
mod echo;
mod exit;
mod history_cmd;
mod mkdir;
mod mv;
mod pwd;
mod rm;
mod rmdir;
mod touch;
mod type_cmd;

use std::collections::HashMap;

use crate::state::ShellState;

/// A single built-in command handler.
pub trait Builtin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run the command. `argv[0]` is the command name itself. Returns
    /// the process-style exit status. Implementations write directly
    /// to fd 1 / fd 2; the stage executor has already arranged for
    /// those descriptors to point at the right place. `registry` is
    /// passed alongside `state` (rather than living inside it) so that
    /// `type` can query builtin membership without a self-referential
    /// borrow of `ShellState`.
    fn run(&self, argv: &[Vec<u8>], state: &mut ShellState, registry: &BuiltinRegistry) -> i32;
}

pub struct BuiltinRegistry {
    commands: HashMap<&'static str, Box<dyn Builtin>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self { commands: HashMap::new() }
    }

    pub fn register(&mut self, cmd: Box<dyn Builtin>) {
        self.commands.insert(cmd.name(), cmd);
    }

    pub fn get(&self, name: &[u8]) -> Option<&dyn Builtin> {
        // Names are always ASCII, so a lossy decode and str comparison
        // is equivalent to byte equality and far more convenient.
        let name = std::str::from_utf8(name).ok()?;
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &[u8]) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    /// The fixed built-in set: `echo`, `exit`, `type`, `pwd`, `cd`,
    /// `history`, `mkdir`, `rmdir`, `rm`, `touch`, `cp`, `mv`.
    pub fn default_set() -> Self {
        let mut reg = Self::new();
        reg.register(Box::new(echo::EchoBuiltin));
        reg.register(Box::new(exit::ExitBuiltin));
        reg.register(Box::new(type_cmd::TypeBuiltin));
        reg.register(Box::new(pwd::PwdBuiltin));
        reg.register(Box::new(cd::CdBuiltin));
        reg.register(Box::new(history_cmd::HistoryBuiltin));
        reg.register(Box::new(mkdir::MkdirBuiltin));
        reg.register(Box::new(rmdir::RmdirBuiltin));
        reg.register(Box::new(rm::RmBuiltin));
        reg.register(Box::new(touch::TouchBuiltin));
        reg.register(Box::new(cp::CpBuiltin));
        reg.register(Box::new(mv::MvBuiltin));
        reg
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::default_set()
    }
}
