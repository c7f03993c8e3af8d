//! Tokenizer for the compact parameter micro-grammar.
//!
//! A compact string like `S300x200Fw` is scanned left to right into raw
//! `(key, value)` tokens. At every position exactly two token shapes are
//! tried, size first:
//!
//! - *Size*: optional `-`, optional `S`, optional `_`, then two runs of
//!   2-or-more digits joined by `x`/`X`. Emits key `s` with a normalized
//!   `<width>x<height>` value: `S300x200`, `-300X200`, `S_20x20`.
//! - *Generic*: optional `-`, one uppercase key letter, optional `_`, then
//!   either a single lowercase letter or a run of 2-or-more digits:
//!   `Fw`, `Q90`, `H_15`, `-W20`.
//!
//! On a match the scanner jumps past the token; otherwise it advances one
//! character. No separator is required between tokens. Tokens are emitted
//! in order of appearance, which is what makes first-occurrence-wins
//! reduction deterministic, so the scan order is part of the public
//! contract for existing URLs.

use super::ParamSource;

/// One `(key, value)` pair extracted from a parameter string or map.
///
/// String-mode keys are single lowercase characters by construction. Map
/// mode lowercases whatever keys it is given; a key with no registered
/// setter fails the decode later, at dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawToken {
    pub key: String,
    pub value: String,
}

/// Normalize any parameter source into the shared token sequence.
pub(crate) fn tokenize(source: &ParamSource) -> Vec<RawToken> {
    match source {
        ParamSource::Route(segment) => scan_compact(segment),
        ParamSource::Query(pairs) => pairs
            .iter()
            .map(|(key, value)| RawToken {
                key: key.to_lowercase(),
                value: value.to_lowercase(),
            })
            .collect(),
        ParamSource::None => Vec::new(),
    }
}

/// Scan a compact string for all non-overlapping tokens, left to right.
pub(crate) fn scan_compact(input: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < input.len() {
        match match_size(input, pos).or_else(|| match_generic(input, pos)) {
            Some((end, token)) => {
                tokens.push(token);
                pos = end;
            }
            None => pos += 1,
        }
    }
    tokens
}

/// End of a run of ASCII digits starting at `start`, if at least `min` long.
fn digit_run(bytes: &[u8], start: usize, min: usize) -> Option<usize> {
    let mut end = start;
    while bytes.get(end).is_some_and(|b| b.is_ascii_digit()) {
        end += 1;
    }
    (end - start >= min).then_some(end)
}

/// Match the size rule at `start`. Returns the end offset and the token.
fn match_size(input: &str, start: usize) -> Option<(usize, RawToken)> {
    let bytes = input.as_bytes();
    let mut i = start;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    if bytes.get(i) == Some(&b'S') {
        i += 1;
    }
    if bytes.get(i) == Some(&b'_') {
        i += 1;
    }
    let width_start = i;
    let width_end = digit_run(bytes, width_start, 2)?;
    if !matches!(bytes.get(width_end), Some(&(b'x' | b'X'))) {
        return None;
    }
    let height_start = width_end + 1;
    let height_end = digit_run(bytes, height_start, 2)?;
    // Token slices are all ASCII, so the str slicing below cannot split a
    // character.
    let value = format!(
        "{}x{}",
        &input[width_start..width_end],
        &input[height_start..height_end]
    );
    Some((
        height_end,
        RawToken {
            key: "s".to_string(),
            value,
        },
    ))
}

/// Match the generic rule at `start`. Returns the end offset and the token.
fn match_generic(input: &str, start: usize) -> Option<(usize, RawToken)> {
    let bytes = input.as_bytes();
    let mut i = start;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    let key = *bytes.get(i)?;
    if !key.is_ascii_uppercase() {
        return None;
    }
    i += 1;
    if bytes.get(i) == Some(&b'_') {
        i += 1;
    }
    let key = (key.to_ascii_lowercase() as char).to_string();
    if let Some(&letter) = bytes.get(i) {
        if letter.is_ascii_lowercase() {
            let value = (letter as char).to_string();
            return Some((i + 1, RawToken { key, value }));
        }
    }
    let end = digit_run(bytes, i, 2)?;
    let value = input[i..end].to_string();
    Some((end, RawToken { key, value }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Vec<(String, String)> {
        scan_compact(input)
            .into_iter()
            .map(|t| (t.key, t.value))
            .collect()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    // =========================================================================
    // Size rule
    // =========================================================================

    #[test]
    fn size_token_with_marker() {
        assert_eq!(scan("S300x200"), vec![pair("s", "300x200")]);
    }

    #[test]
    fn size_token_bare_digits() {
        assert_eq!(scan("300x200"), vec![pair("s", "300x200")]);
    }

    #[test]
    fn size_token_uppercase_x_is_normalized() {
        assert_eq!(scan("S300X200"), vec![pair("s", "300x200")]);
    }

    #[test]
    fn size_token_with_sign_and_separator() {
        assert_eq!(scan("-S_300x200"), vec![pair("s", "300x200")]);
        assert_eq!(scan("_300x200"), vec![pair("s", "300x200")]);
    }

    #[test]
    fn size_requires_two_digits_per_side() {
        // One-digit runs never form a size token, and a lone digit is not
        // a valid generic value either
        assert_eq!(scan("S5x5"), vec![]);
        assert_eq!(scan("S5x50"), vec![]);
    }

    #[test]
    fn doubled_marker_shifts_the_match() {
        // The first S cannot start a size token; the second can.
        assert_eq!(scan("SS300x200"), vec![pair("s", "300x200")]);
    }

    // =========================================================================
    // Generic rule
    // =========================================================================

    #[test]
    fn generic_letter_value() {
        assert_eq!(scan("Fw"), vec![pair("f", "w")]);
    }

    #[test]
    fn generic_digit_value() {
        assert_eq!(scan("Q90"), vec![pair("q", "90")]);
    }

    #[test]
    fn generic_with_sign_and_separator() {
        assert_eq!(scan("-H_15"), vec![pair("h", "15")]);
    }

    #[test]
    fn generic_single_digit_value_is_not_a_token() {
        assert_eq!(scan("W5"), vec![]);
    }

    #[test]
    fn generic_value_must_follow_immediately() {
        assert_eq!(scan("H 15"), vec![]);
    }

    #[test]
    fn size_shape_with_letter_key_falls_to_generic() {
        // `Sw` is not a size token; it scans as key `s`, value `w`. The
        // dispatcher rejects the value, not the scanner.
        assert_eq!(scan("Sw"), vec![pair("s", "w")]);
    }

    // =========================================================================
    // Whole-string scans
    // =========================================================================

    #[test]
    fn tokens_need_no_separator() {
        assert_eq!(
            scan("S300x200Fw"),
            vec![pair("s", "300x200"), pair("f", "w")]
        );
    }

    #[test]
    fn tokens_emitted_in_order_of_appearance() {
        assert_eq!(
            scan("H15W20Q90"),
            vec![pair("h", "15"), pair("w", "20"), pair("q", "90")]
        );
    }

    #[test]
    fn duplicate_keys_all_surface() {
        assert_eq!(scan("H15H25"), vec![pair("h", "15"), pair("h", "25")]);
    }

    #[test]
    fn junk_between_tokens_is_skipped() {
        assert_eq!(
            scan("photo-S300x200.zzFw"),
            vec![pair("s", "300x200"), pair("f", "w")]
        );
    }

    #[test]
    fn width_token_followed_by_stray_dimension() {
        // `W100` is a generic token; the remaining `x200` matches nothing.
        assert_eq!(scan("W100x200"), vec![pair("w", "100")]);
    }

    #[test]
    fn empty_and_unmatchable_inputs() {
        assert_eq!(scan(""), vec![]);
        assert_eq!(scan("lowercase only"), vec![]);
        assert_eq!(scan("Ü"), vec![]);
    }

    // =========================================================================
    // Map and none modes
    // =========================================================================

    #[test]
    fn map_mode_lowercases_keys_and_values() {
        let source = ParamSource::Query(vec![
            ("F".to_string(), "W".to_string()),
            ("Q".to_string(), "90".to_string()),
        ]);
        assert_eq!(
            tokenize(&source),
            vec![
                RawToken {
                    key: "f".to_string(),
                    value: "w".to_string()
                },
                RawToken {
                    key: "q".to_string(),
                    value: "90".to_string()
                },
            ]
        );
    }

    #[test]
    fn map_mode_preserves_insertion_order() {
        let source = ParamSource::Query(vec![
            ("h".to_string(), "15".to_string()),
            ("h".to_string(), "25".to_string()),
        ]);
        let values: Vec<String> = tokenize(&source).into_iter().map(|t| t.value).collect();
        assert_eq!(values, vec!["15", "25"]);
    }

    #[test]
    fn none_mode_yields_no_tokens() {
        assert_eq!(tokenize(&ParamSource::None), vec![]);
    }
}
