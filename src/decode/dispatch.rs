//! Per-key field setters.
//!
//! Applies the reduced key/value list to an initially-empty
//! [`TransformRequest`]. Every registered key carries an explicit update
//! policy:
//!
//! | Key | Field | Policy |
//! |-----|-------|--------|
//! | `s` | whole `resize` | overwrite |
//! | `f` | `format.type` | overwrite |
//! | `q` | `format.options.quality` | overwrite |
//! | `h` | `resize.height` | set-if-absent |
//! | `w` | `resize.width` | set-if-absent |
//!
//! `s` and `q` are whole-field updates and replace whatever is there;
//! `h`/`w` are partial contributions to a resize that `s` may also have
//! populated, so the first value written to the leaf wins. The asymmetry
//! decides the outcome when a size token and separate height/width tokens
//! appear in one input, in either order.
//!
//! A value failing its field's validation leaves the field unset and the
//! decode continues; a key with no setter fails the whole decode.

use super::DecodeError;
use crate::request::{FormatName, FormatOptions, OutputFormat, ResizeSpec, TransformRequest};

/// How a setter treats a field that already holds a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdatePolicy {
    /// Replace whatever is there.
    Overwrite,
    /// First write wins; later writes are ignored.
    SetIfAbsent,
}

fn write<T>(slot: &mut Option<T>, value: T, policy: UpdatePolicy) {
    match policy {
        UpdatePolicy::Overwrite => *slot = Some(value),
        UpdatePolicy::SetIfAbsent => {
            if slot.is_none() {
                *slot = Some(value);
            }
        }
    }
}

/// Fold the reduced key/value list into a transform request.
///
/// Entries are applied in list order (first-occurrence order of keys).
pub(crate) fn dispatch(entries: Vec<(String, String)>) -> Result<TransformRequest, DecodeError> {
    let mut request = TransformRequest::default();
    for (key, value) in entries {
        match key.as_str() {
            "s" => set_size(&mut request, &value),
            "f" => set_format(&mut request, &value),
            "q" => set_quality(&mut request, &value),
            "h" => set_height(&mut request, &value),
            "w" => set_width(&mut request, &value),
            _ => return Err(DecodeError::UnknownKey { key }),
        }
    }
    Ok(request)
}

/// `s`: a whole `WxH` pair replaces any resize built up so far.
fn set_size(request: &mut TransformRequest, value: &str) {
    let Some((width, height)) = find_size_pair(value) else {
        return;
    };
    write(
        &mut request.resize,
        ResizeSpec {
            width: Some(width),
            height: Some(height),
        },
        UpdatePolicy::Overwrite,
    );
}

/// `f`: single-letter format code; codes not in the table fall back to
/// `jpg`. Only whole one-letter values consult the table, so a map-mode
/// value like `"webp"` also lands on the fallback.
fn set_format(request: &mut TransformRequest, value: &str) {
    if value.is_empty() {
        return;
    }
    let name = FormatName::from_code(value).unwrap_or(FormatName::Jpg);
    let format = request.format.get_or_insert_with(OutputFormat::default);
    write(&mut format.name, name, UpdatePolicy::Overwrite);
}

/// `q`: the quality knob, replacing any earlier value.
fn set_quality(request: &mut TransformRequest, value: &str) {
    let Ok(quality) = value.trim().parse::<u32>() else {
        return;
    };
    let options = request
        .format
        .get_or_insert_with(OutputFormat::default)
        .options
        .get_or_insert_with(FormatOptions::default);
    write(&mut options.quality, quality, UpdatePolicy::Overwrite);
}

/// `h`: height contribution; defers to whatever set the leaf first.
fn set_height(request: &mut TransformRequest, value: &str) {
    let Ok(height) = value.trim().parse::<u32>() else {
        return;
    };
    let resize = request.resize.get_or_insert_with(ResizeSpec::default);
    write(&mut resize.height, height, UpdatePolicy::SetIfAbsent);
}

/// `w`: width contribution; defers to whatever set the leaf first.
fn set_width(request: &mut TransformRequest, value: &str) {
    let Ok(width) = value.trim().parse::<u32>() else {
        return;
    };
    let resize = request.resize.get_or_insert_with(ResizeSpec::default);
    write(&mut resize.width, width, UpdatePolicy::SetIfAbsent);
}

/// Find the first `digits{2,} x digits{2,}` pair anywhere in `value`.
///
/// The search is unanchored: map-mode values are arbitrary strings and a
/// size buried in surrounding text still counts, as it always has for
/// existing URLs.
fn find_size_pair(value: &str) -> Option<(u32, u32)> {
    let bytes = value.as_bytes();
    for start in 0..bytes.len() {
        let Some(width_end) = digit_run(bytes, start) else {
            continue;
        };
        if !matches!(bytes.get(width_end), Some(&(b'x' | b'X'))) {
            continue;
        }
        let height_start = width_end + 1;
        let Some(height_end) = digit_run(bytes, height_start) else {
            continue;
        };
        // Dimensions beyond u32 are treated as malformed rather than
        // rescanned from a shorter digit run.
        let width = value[start..width_end].parse().ok()?;
        let height = value[height_start..height_end].parse().ok()?;
        return Some((width, height));
    }
    None
}

fn digit_run(bytes: &[u8], start: usize) -> Option<usize> {
    let mut end = start;
    while bytes.get(end).is_some_and(|b| b.is_ascii_digit()) {
        end += 1;
    }
    (end - start >= 2).then_some(end)
}
