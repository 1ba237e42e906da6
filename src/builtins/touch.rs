use std::fs::OpenOptions;
use std::os::unix::ffi::OsStrExt;

use super::{Builtin, BuiltinRegistry};
use crate::io_raw::write_stderr;
use crate::state::ShellState;
use crate::syscall::strerror;

pub struct TouchBuiltin;

impl Builtin for TouchBuiltin {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn run(&self, argv: &[Vec<u8>], _state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let files = &argv[1..];
        if files.is_empty() {
            write_stderr(b"touch: missing file operand\n");
            return 1;
        }

        let mut status = 0;
        for file in files {
            let path = std::ffi::OsStr::from_bytes(file);
            // create(true) without truncate(true): an existing file is
            // opened and its contents left untouched.
            let result = OpenOptions::new().create(true).write(true).open(path);
            if let Err(e) = result {
                write_stderr(
                    format!(
                        "touch: cannot touch '{}': {}\n",
                        String::from_utf8_lossy(file),
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
