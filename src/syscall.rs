//! Thin helpers over libc for the bits `std` doesn't expose directly:
//! `strerror`-formatted error text (builtins print the raw system
//! message, not Rust's `(os error N)` suffix) and an executable-bit
//! check that matches `access(2)` rather than just the mode bits.

use std::ffi::CStr;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Render an `io::Error` the way the C standard library's `strerror`
/// would, falling back to Rust's own message when there is no errno.
pub fn strerror(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => unsafe {
            let ptr = libc::strerror(code);
            if ptr.is_null() {
                err.to_string()
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        },
        None => err.to_string(),
    }
}

/// True if `path` exists, is a regular file, and is executable by the
/// current process (per `access(2)`, not just the mode bits — this
/// honours the real uid/gid of the caller).
pub fn is_executable_regular_file(path: &Path) -> bool {
    let Ok(c_path) = std::ffi::CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    let executable = unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 };
    executable && std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
