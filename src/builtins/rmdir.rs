use std::os::unix::ffi::OsStrExt;

use super::{Builtin, BuiltinRegistry};
use crate::io_raw::write_stderr;
use crate::state::ShellState;
use crate::syscall::strerror;

pub struct RmdirBuiltin;

impl Builtin for RmdirBuiltin {
    fn name(&self) -> &'static str {
        "rmdir"
    }

    fn run(&self, argv: &[Vec<u8>], _state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let dirs = &argv[1..];
        if dirs.is_empty() {
            write_stderr(b"rmdir: missing operand\n");
            return 1;
        }

        let mut status = 0;
        for dir in dirs {
            let path = std::ffi::OsStr::from_bytes(dir);
            if let Err(e) = std::fs::remove_dir(path) {
                write_stderr(
                    format!(
                        "rmdir: failed to remove '{}': {}\n",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_stderr;

    #[test]
    fn removes_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("empty");
        std::fs::create_dir(&target).unwrap();
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![b"rmdir".to_vec(), target.as_os_str().as_bytes().to_vec()];
        assert_eq!(RmdirBuiltin.run(&argv, &mut state, &registry), 0);
        assert!(!target.exists());
    }

    #[test]
    fn non_empty_directory_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("full");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("f"), b"x").unwrap();
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![b"rmdir".to_vec(), target.as_os_str().as_bytes().to_vec()];
        let err = capture_stderr(|| {
            RmdirBuiltin.run(&argv, &mut state, &registry);
        });
        assert!(err.starts_with(b"rmdir: failed to remove '"));
    }
}
