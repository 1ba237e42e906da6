//! Test-only helpers for exercising builtins that write to the real
//! fd 1 / fd 2, mirroring the save/dup2/restore technique the stage
//! executor (`exec::mod`) uses in production.

#![cfg(test)]

use std::io::Read;
use std::os::unix::io::RawFd;

/// Run `f` with fd 1 redirected into an OS pipe, returning everything
/// written to stdout during the call.
pub fn capture_stdout<F: FnOnce()>(f: F) -> Vec<u8> {
    capture_fd(1, f)
}

pub fn capture_stderr<F: FnOnce()>(f: F) -> Vec<u8> {
    capture_fd(2, f)
}

fn capture_fd<F: FnOnce()>(target: RawFd, f: F) -> Vec<u8> {
    unsafe {
        let mut fds = [0i32; 2];
        assert_eq!(libc::pipe(fds.as_mut_ptr()), 0);
        let (read_fd, write_fd) = (fds[0], fds[1]);

        let saved = libc::dup(target);
        libc::dup2(write_fd, target);
        libc::close(write_fd);

        f();

        libc::dup2(saved, target);
        libc::close(saved);

        let mut file = std::fs::File::from_raw_fd(read_fd);
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).ok();
        buf
    }
}

use std::os::unix::io::FromRawFd;
