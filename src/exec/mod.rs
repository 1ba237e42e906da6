//! 4.E Stage executor — run a single stage, built-in or external,
//! against a triple of already-assigned descriptors.
//!
//! Grounded on the fd-capture technique used for builtin output
//! capture in the pipeline example pack (`pipe`/`dup`/`dup2`/`close`
//! around a handler call), generalized here to restore the *parent's*
//! 0/1/2 after running in place rather than to capture into a buffer.

pub mod pipeline;

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;

use crate::builtins::BuiltinRegistry;
use crate::io_raw::write_stderr;
use crate::redirection::{Redirections, Sink};
use crate::state::ShellState;
use crate::syscall::strerror;

/// One pipeline stage after tokenization and redirection parsing.
pub struct Stage {
    pub argv: Vec<Vec<u8>>,
    pub redirections: Redirections,
}

/// Open the file a `Sink` names, if any, returning a descriptor to
/// `dup2` into place. `None` means "leave the inherited descriptor".
fn open_sink(sink: &Sink) -> Result<Option<RawFd>, std::io::Error> {
    let (path, append) = match sink {
        Sink::Inherit => return Ok(None),
        Sink::TruncateTo(p) => (p, false),
        Sink::AppendTo(p) => (p, true),
    };
    let cpath = CString::new(path.as_slice()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path contains a NUL byte")
    })?;
    let flags = libc::O_WRONLY
        | libc::O_CREAT
        | if append { libc::O_APPEND } else { libc::O_TRUNC };
    let fd = unsafe { libc::open(cpath.as_ptr(), flags, 0o644) };
    if fd < 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(Some(fd))
}

/// Run a built-in stage inline. Saves the parent's 0/1/2, installs
/// `(in, out, err)` layered with the stage's own redirections, runs
/// the handler, and restores the saved descriptors on every path —
/// including when the handler itself writes error diagnostics. A
/// redirection that fails to open aborts just this stage: the handler
/// never runs, and the descriptors are still restored.
pub fn run_builtin_stage(
    handler: &dyn crate::builtins::Builtin,
    stage: &Stage,
    in_fd: RawFd,
    out_fd: RawFd,
    err_fd: RawFd,
    state: &mut ShellState,
    registry: &BuiltinRegistry,
) -> i32 {
    let saved_in = unsafe { libc::dup(0) };
    let saved_out = unsafe { libc::dup(1) };
    let saved_err = unsafe { libc::dup(2) };

    let stdout_override = match open_sink(stage.redirections.stdout.as_ref().unwrap_or(&Sink::Inherit)) {
        Ok(fd) => fd,
        Err(e) => {
            write_stderr(format!("{}: {}\n", stage_name(stage), strerror(&e)).as_bytes());
            unsafe {
                libc::close(saved_in);
                libc::close(saved_out);
                libc::close(saved_err);
            }
            return 1;
        }
    };
    let stderr_override = match open_sink(stage.redirections.stderr.as_ref().unwrap_or(&Sink::Inherit)) {
        Ok(fd) => fd,
        Err(e) => {
            write_stderr(format!("{}: {}\n", stage_name(stage), strerror(&e)).as_bytes());
            if let Some(fd) = stdout_override {
                unsafe { libc::close(fd) };
            }
            unsafe {
                libc::close(saved_in);
                libc::close(saved_out);
                libc::close(saved_err);
            }
            return 1;
        }
    };

    unsafe {
        libc::dup2(in_fd, 0);
        libc::dup2(stdout_override.unwrap_or(out_fd), 1);
        libc::dup2(stderr_override.unwrap_or(err_fd), 2);
        if let Some(fd) = stdout_override {
            libc::close(fd);
        }
        if let Some(fd) = stderr_override {
            libc::close(fd);
        }
    }

    let status = handler.run(&stage.argv, state, registry);

    unsafe {
        libc::dup2(saved_in, 0);
        libc::dup2(saved_out, 1);
        libc::dup2(saved_err, 2);
        libc::close(saved_in);
        libc::close(saved_out);
        libc::close(saved_err);
    }

    status
}

/// Fork and exec an already-resolved external stage. The child dups
/// `(in, out, err)` into 0/1/2, layers its own redirections on top,
/// and execs `resolved_path`; it `_exit(1)`s on any failure along the
/// way without running destructors or flushing the parent's buffers.
/// Returns the child's pid to the caller. Path resolution happens
/// before this is called so that an unresolvable name never forks at
/// all (the not-found message is written by the caller instead).
pub fn spawn_external(
    stage: &Stage,
    resolved_path: &std::path::Path,
    in_fd: RawFd,
    out_fd: RawFd,
    err_fd: RawFd,
) -> Option<libc::pid_t> {
    let pid = unsafe { libc::fork() };
    if pid < 0 {
        write_stderr(format!("{}: fork failed: {}\n", stage_name(stage), strerror(&std::io::Error::last_os_error())).as_bytes());
        return None;
    }
    if pid == 0 {
        child_exec(stage, resolved_path, in_fd, out_fd, err_fd);
        unsafe { libc::_exit(1) };
    }
    Some(pid)
}

/// Runs only inside the forked child. Never returns normally.
fn child_exec(stage: &Stage, resolved_path: &std::path::Path, in_fd: RawFd, out_fd: RawFd, err_fd: RawFd) {
    unsafe {
        libc::dup2(in_fd, 0);
        libc::dup2(out_fd, 1);
        libc::dup2(err_fd, 2);
    }

    match open_sink(stage.redirections.stdout.as_ref().unwrap_or(&Sink::Inherit)) {
        Ok(Some(fd)) => unsafe {
            libc::dup2(fd, 1);
            libc::close(fd);
        },
        Ok(None) => {}
        Err(e) => {
            write_stderr(format!("{}: {}\n", stage_name(stage), strerror(&e)).as_bytes());
            return;
        }
    }
    match open_sink(stage.redirections.stderr.as_ref().unwrap_or(&Sink::Inherit)) {
        Ok(Some(fd)) => unsafe {
            libc::dup2(fd, 2);
            libc::close(fd);
        },
        Ok(None) => {}
        Err(e) => {
            write_stderr(format!("{}: {}\n", stage_name(stage), strerror(&e)).as_bytes());
            return;
        }
    }

    let Ok(cpath) = CString::new(resolved_path.as_os_str().as_bytes()) else {
        return;
    };
    let cargs: Vec<CString> = stage
        .argv
        .iter()
        .filter_map(|a| CString::new(a.as_slice()).ok())
        .collect();
    let mut argv_ptrs: Vec<*const libc::c_char> = cargs.iter().map(|c| c.as_ptr()).collect();
    argv_ptrs.push(std::ptr::null());

    unsafe {
        libc::execv(cpath.as_ptr(), argv_ptrs.as_ptr());
    }
    let name = stage_name(stage);
    write_stderr(format!("{}: exec failed: {}\n", name, strerror(&std::io::Error::last_os_error())).as_bytes());
}

fn stage_name(stage: &Stage) -> String {
    stage
        .argv
        .first()
        .map(|a| String::from_utf8_lossy(a).into_owned())
        .unwrap_or_default()
}

/// Wait for one spawned child. The driver reaps in spawn order but
/// deliberately does not surface the exit status.
pub fn reap(pid: libc::pid_t) {
    let mut status: libc::c_int = 0;
    unsafe {
        libc::waitpid(pid, &mut status, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::BuiltinRegistry;
    use crate::redirection::Redirections;

    fn stage(args: &[&str]) -> Stage {
        Stage {
            argv: args.iter().map(|s| s.as_bytes().to_vec()).collect(),
            redirections: Redirections::default(),
        }
    }

    #[test]
    fn builtin_stage_runs_and_restores_descriptors() {
        let mut state = ShellState::new();
        let registry = BuiltinRegistry::default_set();
        let handler = registry.get(b"pwd").unwrap();
        let before = unsafe { libc::isatty(1) };
        let status = run_builtin_stage(handler, &stage(&["pwd"]), 0, 1, 2, &mut state, &registry);
        let after = unsafe { libc::isatty(1) };
        assert_eq!(status, 0);
        assert_eq!(before, after);
    }

    #[test]
    fn spawn_external_runs_true_and_exits_zero() {
        let resolved = std::path::PathBuf::from("/bin/true");
        if !resolved.exists() {
            return;
        }
        let pid = spawn_external(&stage(&["true"]), &resolved, 0, 1, 2).unwrap();
        let mut status: libc::c_int = 0;
        unsafe {
            libc::waitpid(pid, &mut status, 0);
        }
        assert!(libc::WIFEXITED(status));
        assert_eq!(libc::WEXITSTATUS(status), 0);
    }
}
