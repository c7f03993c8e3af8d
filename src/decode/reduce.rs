//! First-occurrence-wins token reduction.
//!
//! Folds the ordered token sequence into a deduplicated key/value list.
//! Uniqueness here is per *key*; field-level collisions between different
//! keys (`s` vs `h`/`w` both feeding the resize) are resolved later by the
//! dispatcher's per-field policies.

use super::scan::RawToken;

/// Keep the first value seen for every key, preserving first-occurrence
/// order. Dispatch iterates this list in order, so decode results follow
/// the order keys first appeared in the input.
pub(crate) fn reduce(tokens: Vec<RawToken>) -> Vec<(String, String)> {
    let mut reduced: Vec<(String, String)> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !reduced.iter().any(|(key, _)| *key == token.key) {
            reduced.push((token.key, token.value));
        }
    }
    reduced
}
