use std::os::unix::ffi::OsStrExt;

use super::{Builtin, BuiltinRegistry};
use crate::io_raw::write_stderr;
use crate::state::ShellState;
use crate::syscall::strerror;

pub struct MvBuiltin;

impl Builtin for MvBuiltin {
    fn name(&self) -> &'static str {
        "mv"
    }

    fn run(&self, argv: &[Vec<u8>], _state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let args = &argv[1..];
        if args.len() != 2 {
            write_stderr(b"mv: missing file operand\n");
            return 1;
        }
        let (src, dst) = (&args[0], &args[1]);

        match std::fs::rename(
            std::ffi::OsStr::from_bytes(src),
            std::ffi::OsStr::from_bytes(dst),
        ) {
            Ok(()) => 0,
            Err(e) => {
                write_stderr(
                    format!(
                        "mv: cannot move '{}' to '{}': {}\n",
                        String::from_utf8_lossy(src),
                        String::from_utf8_lossy(dst),
                        strerror(&e)
                    )
                    .as_bytes(),
                );
                1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_stderr;

    #[test]
    fn renames_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        std::fs::write(&src, b"payload").unwrap();
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![
            b"mv".to_vec(),
            src.as_os_str().as_bytes().to_vec(),
            dst.as_os_str().as_bytes().to_vec(),
        ];
        assert_eq!(MvBuiltin.run(&argv, &mut state, &registry), 0);
        assert!(!src.exists());
        assert_eq!(std::fs::read(&dst).unwrap(), b"payload");
    }

    #[test]
    fn missing_source_reports_system_error() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("dst.txt");
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![
            b"mv".to_vec(),
            b"/no/such/source".to_vec(),
            dst.as_os_str().as_bytes().to_vec(),
        ];
        let err = capture_stderr(|| {
            MvBuiltin.run(&argv, &mut state, &registry);
        });
        assert!(err.starts_with(b"mv: cannot move '"));
    }
}
