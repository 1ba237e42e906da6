//! SIGINT recovery. The handler does only
//! async-signal-safe work: write a fixed byte string and flip an
//! atomic flag. The blocked `read(2)` in the editor's loop returns
//! with `EINTR`; the editor checks the flag, clears the line buffer,
//! and resumes — the handler itself never touches the buffer.

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigint(_signum: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
    let msg: &[u8] = b"\n$ ";
    unsafe {
        libc::write(1, msg.as_ptr() as *const libc::c_void, msg.len());
    }
}

/// Install the SIGINT handler via `sigaction` rather than `signal(2)`:
/// glibc's `signal()` sets `SA_RESTART` for BSD-compatibility, which
/// would make the editor's blocked `read` transparently resume instead
/// of returning `EINTR` — defeating the recovery scheme the editor
/// relies on. `sigaction` lets us leave `SA_RESTART` unset explicitly.
pub fn install() {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handle_sigint as libc::sighandler_t;
        libc::sigemptyset(&mut action.sa_mask);
        action.sa_flags = 0;
        libc::sigaction(libc::SIGINT, &action, std::ptr::null_mut());
    }
}

/// Consume the interrupted flag, returning whether SIGINT fired since
/// the last call.
pub fn take_interrupted() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}
