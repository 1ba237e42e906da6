//! Shell-internal error taxonomy.
//!
//! Most user-visible failures (bad redirections, unknown commands,
//! builtin misuse) are never represented as `Result` — they are written
//! directly to the relevant stage's stderr stream and the REPL moves
//! on. `ShellError` exists only for the handful of call sites that have
//! no stream to report through yet, such as `pipe(2)` failing in the
//! pipeline driver before any stage has a stderr descriptor assigned
//! (see `exec::pipeline::allocate_pipes`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid pipeline: {0}")]
    Pipeline(String),
}

pub type ShellResult<T> = Result<T, ShellError>;
