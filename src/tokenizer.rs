//! 4.A Tokenizer — byte line to argument vector.
//!
//! Single left-to-right pass over an implicit three-mode state
//! machine (Unquoted / SingleQuoted / DoubleQuoted). Produces owned
//! tokens rather than slicing the input in place, avoiding the
//! lifetime hazards of in-buffer mutation.

/// A single generous cap for argument count, consolidating the
/// original's stage-vs-pipeline 20/32 split into one uniform value.
pub const MAX_ARGS: usize = 256;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Unquoted,
    Single,
    Double,
}

/// Tokenize a raw input line (no trailing newline) into an argument
/// vector. Malformed quoting is never an error — unterminated quotes
/// simply close silently at end of input.
pub fn tokenize(line: &[u8]) -> Vec<Vec<u8>> {
    let mut tokens: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    let mut mode = Mode::Unquoted;
    let mut i = 0;

    while i < line.len() {
        if tokens.len() >= MAX_ARGS {
            break;
        }
        let b = line[i];
        match mode {
            Mode::Unquoted => match b {
                b' ' | b'\t' => {
                    if let Some(tok) = current.take() {
                        tokens.push(tok);
                    }
                    i += 1;
                }
                b'\'' => {
                    current.get_or_insert_with(Vec::new);
                    mode = Mode::Single;
                    i += 1;
                }
                b'"' => {
                    current.get_or_insert_with(Vec::new);
                    mode = Mode::Double;
                    i += 1;
                }
                b'\\' => {
                    current.get_or_insert_with(Vec::new);
                    if i + 1 < line.len() {
                        current.as_mut().unwrap().push(line[i + 1]);
                        i += 2;
                    } else {
                        i += 1; // trailing backslash discarded
                    }
                }
                other => {
                    current.get_or_insert_with(Vec::new).push(other);
                    i += 1;
                }
            },
            Mode::Single => {
                if b == b'\'' {
                    mode = Mode::Unquoted;
                } else {
                    current.as_mut().unwrap().push(b);
                }
                i += 1;
            }
            Mode::Double => {
                if b == b'\\' && i + 1 < line.len() && matches!(line[i + 1], b'"' | b'\\') {
                    current.as_mut().unwrap().push(line[i + 1]);
                    i += 2;
                } else if b == b'"' {
                    mode = Mode::Unquoted;
                    i += 1;
                } else {
                    current.as_mut().unwrap().push(b);
                    i += 1;
                }
            }
        }
    }

    if let Some(tok) = current.take() {
        tokens.push(tok);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Vec<Vec<u8>> {
        tokenize(s.as_bytes())
    }

    fn s(v: &[Vec<u8>]) -> Vec<String> {
        v.iter().map(|t| String::from_utf8_lossy(t).into_owned()).collect()
    }

    #[test]
    fn basic_split() {
        assert_eq!(s(&t("echo hello world")), vec!["echo", "hello", "world"]);
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(s(&t("echo   a\tb")), vec!["echo", "a", "b"]);
    }

    #[test]
    fn single_quotes_preserve_whitespace() {
        assert_eq!(s(&t("echo 'a  b'")), vec!["echo", "a  b"]);
    }

    #[test]
    fn double_quotes_escape_set() {
        assert_eq!(s(&t(r#"echo "c\"d""#)), vec!["echo", "c\"d"]);
    }

    #[test]
    fn double_quotes_backslash_other_byte_kept_literal() {
        // \n inside double quotes: backslash is not in the {", \} escape
        // set so it and the following byte are both emitted.
        assert_eq!(s(&t(r#""a\nb""#)), vec!["a\\nb"]);
    }

    #[test]
    fn adjacent_quoted_and_unquoted_runs_concatenate() {
        assert_eq!(s(&t(r#"ab"cd"ef"#)), vec!["abcdef"]);
    }

    #[test]
    fn quote_idempotence() {
        assert_eq!(s(&t("'X'")), vec!["X"]);
        assert_eq!(s(&t("\"X\"")), vec!["X"]);
    }

    #[test]
    fn unterminated_quote_closes_silently() {
        assert_eq!(s(&t("echo 'abc")), vec!["echo", "abc"]);
    }

    #[test]
    fn trailing_backslash_discarded() {
        assert_eq!(s(&t("echo a\\")), vec!["echo", "a"]);
    }

    #[test]
    fn empty_line_yields_no_tokens() {
        assert!(t("").is_empty());
        assert!(t("   ").is_empty());
    }

    #[test]
    fn round_trip_without_special_bytes() {
        let original = vec![b"alpha".to_vec(), b"beta".to_vec(), b"gamma".to_vec()];
        let joined = original.join(&b' ');
        assert_eq!(tokenize(&joined), original);
    }
}
