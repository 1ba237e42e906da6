use std::fs::OpenOptions;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;

use super::{Builtin, BuiltinRegistry};
use crate::io_raw::write_stderr;
use crate::state::ShellState;
use crate::syscall::strerror;

pub struct CpBuiltin;

impl Builtin for CpBuiltin {
    fn name(&self) -> &'static str {
        "cp"
    }

    fn run(&self, argv: &[Vec<u8>], _state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let args = &argv[1..];
        if args.len() != 2 {
            write_stderr(b"cp: missing file operand\n");
            return 1;
        }
        let (src, dst) = (&args[0], &args[1]);

        let contents = match std::fs::read(std::ffi::OsStr::from_bytes(src)) {
            Ok(c) => c,
            Err(e) => {
                write_stderr(
                    format!(
                        "cp: cannot stat '{}': {}\n",
                        String::from_utf8_lossy(src),
                        strerror(&e)
                    )
                    .as_bytes(),
                );
                return 1;
            }
        };

        let result = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .mode(0o644)
            .open(std::ffi::OsStr::from_bytes(dst))
            .and_then(|mut f| f.write_all(&contents));

        if let Err(e) = result {
            write_stderr(
                format!(
                    "cp: cannot create regular file '{}': {}\n",
                    String::from_utf8_lossy(dst),
                    strerror(&e)
                )
                .as_bytes(),
            );
            return 1;
        }
        0
    }
}
