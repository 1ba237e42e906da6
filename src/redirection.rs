//! 4.B Redirection parser — extracts redirection operators from an
//! already-tokenized argument vector, mutating it in place.

/// Destination for a stage's stdout or stderr stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Inherit,
    TruncateTo(Vec<u8>),
    AppendTo(Vec<u8>),
}

/// The redirections recorded for one stage. `None` means the operator
/// never appeared; the caller substitutes `Sink::Inherit` itself so
/// that "never redirected" and "explicitly inherited" stay distinct in
/// case that distinction ever matters upstream.
#[derive(Debug, Default, Clone)]
pub struct Redirections {
    pub stdout: Option<Sink>,
    pub stderr: Option<Sink>,
}

/// Scan `argv` left to right, removing every redirection operator and
/// its target. Later operators for the same stream overwrite earlier
/// ones. An operator with nothing following it is silently dropped.
pub fn parse_redirections(argv: &mut Vec<Vec<u8>>) -> Redirections {
    let mut out = Redirections::default();
    let mut kept = Vec::with_capacity(argv.len());
    let mut i = 0;

    while i < argv.len() {
        match operator(&argv[i]) {
            Some((to_stderr, append)) => {
                if i + 1 < argv.len() {
                    let target = argv[i + 1].clone();
                    let sink = if append {
                        Sink::AppendTo(target)
                    } else {
                        Sink::TruncateTo(target)
                    };
                    if to_stderr {
                        out.stderr = Some(sink);
                    } else {
                        out.stdout = Some(sink);
                    }
                    i += 2;
                } else {
                    i += 1; // dangling operator, dropped
                }
            }
            None => {
                kept.push(argv[i].clone());
                i += 1;
            }
        }
    }

    *argv = kept;
    out
}

fn operator(tok: &[u8]) -> Option<(bool, bool)> {
    match tok {
        b">" | b"1>" => Some((false, false)),
        b">>" | b"1>>" => Some((false, true)),
        b"2>" => Some((true, false)),
        b"2>>" => Some((true, true)),
        _ => None,
    }
}
