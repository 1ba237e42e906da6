//! 4.I Completion engine — prefix search across builtins and `PATH`
//! executables, longest-common-prefix extension, two-stage ambiguity
//! signalling.

use crate::builtins::BuiltinRegistry;
use crate::path_resolver;

/// Outcome of one Tab press, independent of terminal rendering.
pub enum CompletionOutcome {
    /// No candidate starts with the prefix. Ring the bell and forget
    /// any pending second-tap state.
    NoMatch,
    /// Extend the buffer's prefix slice to `replacement`. `exact` is
    /// true when there was exactly one candidate and the replacement
    /// is its full length (caller should append a trailing space).
    Extend { replacement: Vec<u8>, exact: bool },
    /// LCP already equals the typed prefix and more than one candidate
    /// remains, and this is the first Tab on this prefix: ring the
    /// bell and arm the second-tap state.
    AmbiguousFirst,
    /// Second consecutive Tab on the same ambiguous prefix: list
    /// `candidates`.
    AmbiguousList { candidates: Vec<Vec<u8>> },
}

/// Byte offset of the completion prefix: the suffix of `buf` back to
/// the last space, or the whole buffer if there is none.
pub fn prefix_start(buf: &[u8]) -> usize {
    buf.iter().rposition(|&b| b == b' ').map(|i| i + 1).unwrap_or(0)
}

/// Run the candidate search and classify the outcome. `second_tab`
/// indicates this Tab immediately follows another Tab on the same
/// (unchanged) prefix.
pub fn complete(
    buf: &[u8],
    registry: &BuiltinRegistry,
    path_env: &[u8],
    second_tab: bool,
) -> CompletionOutcome {
    let start = prefix_start(buf);
    let prefix = &buf[start..];

    let mut candidates: Vec<Vec<u8>> = registry
        .names()
        .iter()
        .filter(|name| name.as_bytes().starts_with(prefix))
        .map(|name| name.as_bytes().to_vec())
        .collect();

    if candidates.is_empty() {
        candidates = path_resolver::list_executables(path_env)
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect();
    }

    candidates.sort();

    if candidates.is_empty() {
        return CompletionOutcome::NoMatch;
    }

    let lcp = longest_common_prefix(&candidates);
    if lcp.len() > prefix.len() {
        let exact = candidates.len() == 1 && lcp.len() == candidates[0].len();
        return CompletionOutcome::Extend { replacement: lcp, exact };
    }

    if second_tab {
        CompletionOutcome::AmbiguousList { candidates }
    } else {
        CompletionOutcome::AmbiguousFirst
    }
}

/// Longest common prefix (byte-wise) over a non-empty candidate set.
pub fn longest_common_prefix(items: &[Vec<u8>]) -> Vec<u8> {
    let mut lcp = match items.first() {
        Some(first) => first.clone(),
        None => return Vec::new(),
    };
    for item in &items[1..] {
        let max = lcp.len().min(item.len());
        let mut i = 0;
        while i < max && lcp[i] == item[i] {
            i += 1;
        }
        lcp.truncate(i);
    }
    lcp
}
