use std::os::unix::ffi::OsStrExt;

use super::{Builtin, BuiltinRegistry};
use crate::io_raw::write_stderr;
use crate::state::ShellState;
use crate::syscall::strerror;

pub struct CdBuiltin;

impl Builtin for CdBuiltin {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn run(&self, argv: &[Vec<u8>], _state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let args = &argv[1..];
        if args.len() > 1 {
            write_stderr(b"cd: too many arguments\n");
            return 1;
        }

        let target: Vec<u8> = if args.is_empty() || args[0] == b"~" {
            match std::env::var_os("HOME") {
                Some(home) => home.as_bytes().to_vec(),
                None => {
                    write_stderr(b"cd: HOME not set\n");
                    return 1;
                }
            }
        } else {
            args[0].clone()
        };

        let path = std::ffi::OsStr::from_bytes(&target);
        match std::env::set_current_dir(path) {
            Ok(()) => 0,
            Err(e) => {
                write_stderr(
                    format!(
                        "cd: {}: {}\n",
                        String::from_utf8_lossy(&target),
                        strerror(&e)
                    )
                    .as_bytes(),
                );
                1
            }
        }
    }
}
