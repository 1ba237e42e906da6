use std::os::unix::ffi::OsStrExt;

use super::{Builtin, BuiltinRegistry};
use crate::io_raw::write_stdout;
use crate::path_resolver;
use crate::state::ShellState;

pub struct TypeBuiltin;

impl Builtin for TypeBuiltin {
    fn name(&self) -> &'static str {
        "type"
    }

    fn run(&self, argv: &[Vec<u8>], _state: &mut ShellState, registry: &BuiltinRegistry) -> i32 {
        let Some(target) = argv.get(1) else {
            return 0;
        };

        if registry.contains(target) {
            write_stdout(target);
            write_stdout(b" is a shell builtin\n");
            return 0;
        }

        let path_env = path_resolver::path_env();
        match path_resolver::resolve(target, &path_env) {
            Some(path) => {
                write_stdout(target);
                write_stdout(b" is ");
                write_stdout(path.as_os_str().as_bytes());
                write_stdout(b"\n");
                0
            }
            None => {
                write_stdout(target);
                write_stdout(b": not found\n");
                1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_stdout;

    #[test]
    fn reports_builtin() {
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![b"type".to_vec(), b"echo".to_vec()];
        let out = capture_stdout(|| {
            TypeBuiltin.run(&argv, &mut state, &registry);
        });
        assert_eq!(out, b"echo is a shell builtin\n");
    }

    #[test]
    fn reports_not_found() {
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![b"type".to_vec(), b"zzznosuchcmd".to_vec()];
        let out = capture_stdout(|| {
            TypeBuiltin.run(&argv, &mut state, &registry);
        });
        assert_eq!(out, b"zzznosuchcmd: not found\n");
    }
}
