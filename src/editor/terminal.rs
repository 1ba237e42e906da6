//! Terminal mode state: process-wide, captured once
//! at startup and restored on every non-local exit.
//!
//! Raw mode is toggled on a *dedicated* descriptor obtained by
//! `dup(2)`-ing the controlling terminal at startup, not on fd 0
//! directly. Pipeline execution repeatedly dup2's fd 0 to point at
//! pipe read ends and back; if termios calls targeted
//! "fd 0" they could land on a pipe instead of the terminal whenever a
//! builtin that touches terminal mode (`exit`) runs as a non-first
//! pipeline stage. A stable, never-redirected descriptor avoids that
//! hazard — the same snapshot-via-dup technique the stage executor
//! already uses for 0/1/2.

use std::os::unix::io::RawFd;
use std::sync::{Mutex, OnceLock};

static TERMINAL_FD: OnceLock<RawFd> = OnceLock::new();
static SAVED_MODE: OnceLock<Mutex<Option<libc::termios>>> = OnceLock::new();

fn saved_mode() -> &'static Mutex<Option<libc::termios>> {
    SAVED_MODE.get_or_init(|| Mutex::new(None))
}

/// RAII guard: enables raw mode on construction, restores the
/// original mode on drop (and the `exit` builtin restores explicitly,
/// since `process::exit` skips destructors).
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> std::io::Result<Self> {
        let term_fd = *TERMINAL_FD.get_or_init(|| unsafe { libc::dup(0) });

        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(term_fd, &mut original) } != 0 {
            return Err(std::io::Error::last_os_error());
        }
        *saved_mode().lock().unwrap() = Some(original);

        let mut raw = original;
        unsafe { libc::cfmakeraw(&mut raw) };
        if unsafe { libc::tcsetattr(term_fd, libc::TCSANOW, &raw) } != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        restore();
    }
}

/// Restore the original terminal mode, if a mode was ever saved.
/// Idempotent: a second call is a no-op. Safe to call from the `exit`
/// builtin ahead of `process::exit`, which never runs `Drop` impls.
pub fn restore() {
    let term_fd = match TERMINAL_FD.get() {
        Some(fd) => *fd,
        None => return,
    };
    if let Some(mode) = saved_mode().lock().unwrap().take() {
        unsafe {
            libc::tcsetattr(term_fd, libc::TCSANOW, &mode);
        }
    }
}

/// The descriptor the line editor should `read(2)` from — always 0,
/// the real stdin, independent of the dedicated termios descriptor
/// above.
pub const EDITOR_READ_FD: RawFd = 0;
