//! 4.G Line editor — the interactive REPL loop: raw-mode byte-at-a-time
//! reading, destructive backspace, history navigation, tab completion,
//! and SIGINT recovery.
//!
//! Grounded on the manual raw-mode double-tap-completion REPL in the
//! closest single-file reference shell in the pack, restructured
//! around owned byte vectors and the crate's own history/completion
//! modules rather than that file's ad hoc globals.

pub mod signal;
pub mod terminal;

use crate::builtins::BuiltinRegistry;
use crate::completion::{self, CompletionOutcome};
use crate::exec::pipeline;
use crate::io_raw::write_stdout;
use crate::path_resolver;
use crate::state::ShellState;

const PROMPT: &[u8] = b"$ ";
const MAX_LINE: usize = 1024;

/// In-progress input line plus the navigation bits the editor owns.
struct LineBuffer {
    buf: Vec<u8>,
    saved_draft: Vec<u8>,
    /// -1 = editing the live draft; otherwise an index into history.
    history_cursor: isize,
    last_key_was_tab: bool,
}

impl LineBuffer {
    fn new() -> Self {
        Self {
            buf: Vec::new(),
            saved_draft: Vec::new(),
            history_cursor: -1,
            last_key_was_tab: false,
        }
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.saved_draft.clear();
        self.history_cursor = -1;
        self.last_key_was_tab = false;
    }
}

fn print_prompt() {
    write_stdout(PROMPT);
}

/// Redraw the whole line: clear to end of line after a fresh `\r`,
/// reprint the prompt, then the buffer.
fn redraw(buf: &[u8]) {
    write_stdout(b"\r\x1b[K");
    write_stdout(PROMPT);
    write_stdout(buf);
}

/// Read one byte for an escape-sequence continuation. A short read or
/// an interruption just aborts the sequence, matching "any other
/// sequence is ignored" — the interrupted flag, if set, is left for
/// the main loop's own read to pick up on its next iteration.
fn read_one_byte() -> Option<u8> {
    let mut byte = [0u8; 1];
    let n = unsafe {
        libc::read(
            terminal::EDITOR_READ_FD,
            byte.as_mut_ptr() as *mut libc::c_void,
            1,
        )
    };
    if n == 1 {
        Some(byte[0])
    } else {
        None
    }
}

/// Run the interactive REPL until EOF on an empty buffer. Installs the
/// SIGINT handler and raw terminal mode for the duration.
pub fn run(state: &mut ShellState, registry: &BuiltinRegistry) {
    signal::install();
    let _raw_guard = match terminal::RawModeGuard::enable() {
        Ok(guard) => Some(guard),
        Err(e) => {
            log::warn!("failed to enable raw terminal mode: {e}");
            None
        }
    };

    print_prompt();
    let mut line = LineBuffer::new();

    loop {
        let mut byte = [0u8; 1];
        let n = unsafe {
            libc::read(
                terminal::EDITOR_READ_FD,
                byte.as_mut_ptr() as *mut libc::c_void,
                1,
            )
        };

        if n < 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINTR) {
                if signal::take_interrupted() {
                    // The handler itself already wrote the redraw
                    // ("\n$ "); reset the buffer only, or the prompt
                    // doubles up on every Ctrl-C.
                    line.reset();
                }
                continue;
            }
            continue;
        }

        if n == 0 {
            if line.buf.is_empty() {
                break;
            }
            continue;
        }

        match byte[0] {
            b'\n' => {
                write_stdout(b"\n");
                if !line.buf.is_empty() {
                    state.history.push(line.buf.clone());
                }
                state.last_status = pipeline::run_line(&line.buf, state, registry);
                line.reset();
                print_prompt();
            }
            0x1b => {
                let (a, b) = match (read_one_byte(), read_one_byte()) {
                    (Some(a), Some(b)) => (a, b),
                    _ => continue,
                };
                if a == b'[' && b == b'A' {
                    history_up(&mut line, state);
                } else if a == b'[' && b == b'B' {
                    history_down(&mut line, state);
                }
            }
            0x09 => handle_tab(&mut line, registry),
            0x7f => {
                if !line.buf.is_empty() {
                    line.buf.pop();
                    write_stdout(b"\x08 \x08");
                }
                line.history_cursor = -1;
                line.last_key_was_tab = false;
            }
            other => {
                if line.buf.len() < MAX_LINE {
                    line.buf.push(other);
                    write_stdout(&[other]);
                }
                line.history_cursor = -1;
                line.last_key_was_tab = false;
            }
        }
    }
}

fn history_up(line: &mut LineBuffer, state: &ShellState) {
    if state.history.is_empty() {
        return;
    }
    if line.history_cursor == -1 {
        line.saved_draft = line.buf.clone();
        line.history_cursor = state.history.len() as isize - 1;
    } else if line.history_cursor > 0 {
        line.history_cursor -= 1;
    }
    if let Some(entry) = state.history.get(line.history_cursor as usize) {
        line.buf = entry.to_vec();
        redraw(&line.buf);
    }
}

fn history_down(line: &mut LineBuffer, state: &ShellState) {
    if line.history_cursor == -1 {
        return;
    }
    let last = state.history.len() as isize - 1;
    if line.history_cursor < last {
        line.history_cursor += 1;
        if let Some(entry) = state.history.get(line.history_cursor as usize) {
            line.buf = entry.to_vec();
            redraw(&line.buf);
        }
    } else {
        line.history_cursor = -1;
        line.buf = line.saved_draft.clone();
        redraw(&line.buf);
    }
}

fn handle_tab(line: &mut LineBuffer, registry: &BuiltinRegistry) {
    let path_env = path_resolver::path_env();
    let outcome = completion::complete(&line.buf, registry, &path_env, line.last_key_was_tab);
    match outcome {
        CompletionOutcome::NoMatch => {
            write_stdout(b"\x07");
            line.last_key_was_tab = false;
        }
        CompletionOutcome::Extend { replacement, exact } => {
            let start = completion::prefix_start(&line.buf);
            line.buf.truncate(start);
            line.buf.extend_from_slice(&replacement);
            if exact {
                line.buf.push(b' ');
            }
            redraw(&line.buf);
            line.last_key_was_tab = false;
        }
        CompletionOutcome::AmbiguousFirst => {
            write_stdout(b"\x07");
            line.last_key_was_tab = true;
        }
        CompletionOutcome::AmbiguousList { candidates } => {
            write_stdout(b"\n");
            let joined = candidates
                .iter()
                .map(|c| String::from_utf8_lossy(c).into_owned())
                .collect::<Vec<_>>()
                .join("  ");
            write_stdout(joined.as_bytes());
            write_stdout(b"\n");
            redraw(&line.buf);
            line.last_key_was_tab = false;
        }
    }
}
