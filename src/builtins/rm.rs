use std::os::unix::ffi::OsStrExt;

use super::{Builtin, BuiltinRegistry};
use crate::io_raw::write_stderr;
use crate::state::ShellState;
use crate::syscall::strerror;

pub struct RmBuiltin;

impl Builtin for RmBuiltin {
    fn name(&self) -> &'static str {
        "rm"
    }

    fn run(&self, argv: &[Vec<u8>], _state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let mut recursive = false;
        let mut force = false;
        let mut targets: Vec<&[u8]> = Vec::new();

        for arg in &argv[1..] {
            match arg.as_slice() {
                b"-r" | b"-R" | b"-rf" | b"-Rf" | b"-fr" | b"-fR" => {
                    recursive = true;
                    if arg.len() == 3 {
                        force = true;
                    }
                }
                b"-f" => force = true,
                other => targets.push(other),
            }
        }

        if targets.is_empty() {
            write_stderr(b"rm: missing operand\n");
            return 1;
        }

        let mut status = 0;
        for target in targets {
            let path = std::ffi::OsStr::from_bytes(target);
            let meta = std::fs::symlink_metadata(path);
            let result = match meta {
                Ok(m) if m.is_dir() => {
                    if recursive {
                        std::fs::remove_dir_all(path)
                    } else {
                        Err(std::io::Error::from_raw_os_error(libc::EISDIR))
                    }
                }
                Ok(_) => std::fs::remove_file(path),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                if !force {
                    write_stderr(
                        format!(
                            "rm: cannot remove '{}': {}\n",
                            String::from_utf8_lossy(target),
                            strerror(&e)
                        )
                        .as_bytes(),
                    );
                    status = 1;
                }
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
    fn removes_a_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("f");
        std::fs::write(&target, b"x").unwrap();
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![b"rm".to_vec(), target.as_os_str().as_bytes().to_vec()];
        assert_eq!(RmBuiltin.run(&argv, &mut state, &registry), 0);
        assert!(!target.exists());
    }

    #[test]
    fn directory_without_recursive_flag_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("d");
        std::fs::create_dir(&target).unwrap();
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![b"rm".to_vec(), target.as_os_str().as_bytes().to_vec()];
        let err = capture_stderr(|| {
            RmBuiltin.run(&argv, &mut state, &registry);
        });
        assert!(err.starts_with(b"rm: cannot remove '"));
        assert!(target.exists());
    }

    #[test]
    fn recursive_removes_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("tree");
        std::fs::create_dir_all(target.join("nested")).unwrap();
        std::fs::write(target.join("nested/f"), b"x").unwrap();
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![
            b"rm".to_vec(),
            b"-r".to_vec(),
            target.as_os_str().as_bytes().to_vec(),
        ];
        assert_eq!(RmBuiltin.run(&argv, &mut state, &registry), 0);
        assert!(!target.exists());
    }

    #[test]
    fn force_suppresses_nonexistent_target_error() {
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let argv = vec![
            b"rm".to_vec(),
            b"-f".to_vec(),
            b"/no/such/path".to_vec(),
        ];
        let err = capture_stderr(|| {
            assert_eq!(RmBuiltin.run(&argv, &mut state, &registry), 0);
        });
        assert!(err.is_empty());
    }
}
