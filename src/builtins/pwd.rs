use super::{Builtin, BuiltinRegistry};
use crate::io_raw::{write_stderr, write_stdout};
use crate::state::ShellState;
use crate::syscall::strerror;
use std::os::unix::ffi::OsStrExt;

pub struct PwdBuiltin;

impl Builtin for PwdBuiltin {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn run(&self, _argv: &[Vec<u8>], _state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        match std::env::current_dir() {
            Ok(path) => {
                write_stdout(path.as_os_str().as_bytes());
                write_stdout(b"\n");
                0
            }
            Err(e) => {
                write_stderr(format!("pwd: {}\n", strerror(&e)).as_bytes());
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
    fn prints_current_dir() {
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let out = capture_stdout(|| {
            PwdBuiltin.run(&[], &mut state, &registry);
        });
        let expected = format!("{}\n", std::env::current_dir().unwrap().display());
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
