use super::{Builtin, BuiltinRegistry};
use crate::io_raw::{write_stderr, write_stdout};
use crate::state::ShellState;
use crate::syscall::strerror;

pub struct HistoryBuiltin;

impl Builtin for HistoryBuiltin {
    fn name(&self) -> &'static str {
        "history"
    }

    fn run(&self, argv: &[Vec<u8>], state: &mut ShellState, _registry: &BuiltinRegistry) -> i32 {
        let args = &argv[1..];

        if args.is_empty() {
            print_history(state, None);
            return 0;
        }

        match args[0].as_slice() {
            b"-r" => run_file_op(args, |path| state.history.read_file(path)),
            b"-w" => run_file_op(args, |path| state.history.write_file(path)),
            b"-a" => run_file_op(args, |path| state.history.append_file(path)),
            other => {
                let n = std::str::from_utf8(other).ok().and_then(|s| s.parse::<usize>().ok());
                print_history(state, n);
                0
            }
        }
    }
}

fn run_file_op(args: &[Vec<u8>], op: impl FnOnce(&[u8]) -> std::io::Result<()>) -> i32 {
    let Some(path) = args.get(1) else {
        write_stderr(b"history: option requires an argument\n");
        return 1;
    };
    match op(path) {
        Ok(()) => 0,
        Err(e) => {
            write_stderr(
                format!(
                    "history: {}: {}\n",
                    String::from_utf8_lossy(path),
                    strerror(&e)
                )
                .as_bytes(),
            );
            1
        }
    }
}

fn print_history(state: &ShellState, limit: Option<usize>) {
    let count = state.history.len();
    let n = limit.map(|l| l.min(count)).unwrap_or(count);
    let start = count - n;
    for (i, entry) in state.history.iter().enumerate().skip(start) {
        write_stdout(format!("{:5}  ", i + 1).as_bytes());
        write_stdout(entry);
        write_stdout(b"\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_stdout;
    use std::os::unix::ffi::OsStrExt;

    fn seeded_state(n: usize) -> ShellState {
        let mut state = ShellState::new();
        for i in 0..n {
            state.history.push(format!("cmd{i}").into_bytes());
        }
        state
    }

    #[test]
    fn prints_all_numbered_from_one() {
        let mut state = seeded_state(3);
        let registry = BuiltinRegistry::default_set();
        let out = capture_stdout(|| {
            HistoryBuiltin.run(&[b"history".to_vec()], &mut state, &registry);
        });
        assert_eq!(out, b"    1  cmd0\n    2  cmd1\n    3  cmd2\n");
    }

    #[test]
    fn limits_to_last_n_but_keeps_absolute_numbering() {
        let mut state = seeded_state(5);
        let registry = BuiltinRegistry::default_set();
        let argv = vec![b"history".to_vec(), b"2".to_vec()];
        let out = capture_stdout(|| {
            HistoryBuiltin.run(&argv, &mut state, &registry);
        });
        assert_eq!(out, b"    4  cmd3\n    5  cmd4\n");
    }

    #[test]
    fn dash_w_then_dash_a_rewrites_delta_without_resetting_mark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist");
        let path_bytes = path.as_os_str().as_bytes().to_vec();

        let mut state = ShellState::new();
        state.history.push(b"a".to_vec());
        state.history.append_file(&path_bytes).unwrap();
        state.history.push(b"b".to_vec());

        let registry = BuiltinRegistry::default_set();
        let argv_w = vec![b"history".to_vec(), b"-w".to_vec(), path_bytes.clone()];
        HistoryBuiltin.run(&argv_w, &mut state, &registry);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");

        let argv_a = vec![b"history".to_vec(), b"-a".to_vec(), path_bytes.clone()];
        HistoryBuiltin.run(&argv_a, &mut state, &registry);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\na\nb\n");
    }
}
