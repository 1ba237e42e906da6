use std::os::unix::ffi::OsStrExt;

use super::{Builtin, BuiltinRegistry};
use crate::io_raw::write_stderr;
use crate::state::ShellState;
use crate::syscall::strerror;

pub struct MkdirBuiltin;

impl Builtin for MkdirBuiltin {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn run(&self, argv: &[Vec<u8>], _state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let mut parents = false;
        let mut dirs: Vec<&[u8]> = Vec::new();
        for arg in &argv[1..] {
            if arg.as_slice() == b"-p" {
                parents = true;
            } else {
                dirs.push(arg);
            }
        }

        if dirs.is_empty() {
            write_stderr(b"mkdir: missing operand\n");
            return 1;
        }

        let mut status = 0;
        for dir in dirs {
            let path = std::ffi::OsStr::from_bytes(dir);
            let result = if parents {
                std::fs::create_dir_all(path)
            } else {
                std::fs::create_dir(path)
            };
            if let Err(e) = result {
                write_stderr(
                    format!(
                        "mkdir: cannot create directory '{}': {}\n",
                        String::from_utf8_lossy(dir),
                        strerror(&e)
                    )
                    .as_bytes(),
                );
                status = 1;
            }
        }
        status
    }
}
