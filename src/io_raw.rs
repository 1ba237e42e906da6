//! Unbuffered writes to raw file descriptors.
//!
//! Builtins and the editor never go through `std::io::Stdout` — it
//! internally line-buffers and would interleave badly with the
//! direct-descriptor writes external children make on the same fd
//! once a stage's streams have been dup2'd into place. Every write
//! here goes straight to the kernel, matching unbuffered
//! `setbuf(stdout, NULL)` output.

use std::os::unix::io::RawFd;

/// Write the full buffer to `fd`, retrying on short writes.
/// Failures are silently dropped — a full disk or a closed pipe on the
/// write side of a redirection is not fatal to the shell.
pub fn write_all(fd: RawFd, mut buf: &[u8]) {
    while !buf.is_empty() {
        let n = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
        if n <= 0 {
            break;
        }
        buf = &buf[n as usize..];
    }
}

/// Write to the stage's current stdout (fd 1).
pub fn write_stdout(buf: &[u8]) {
    write_all(1, buf);
}

/// Write to the stage's current stderr (fd 2).
pub fn write_stderr(buf: &[u8]) {
    write_all(2, buf);
}
