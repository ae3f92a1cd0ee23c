// ABOUTME: Tri-state boolean normalization of arbitrary field values
// ABOUTME: Total pure function with fixed word tables and numeric fallback

//! Boolean normalization.
//!
//! [`normalize_bool`] maps any [`FieldValue`] to one of three logical
//! outcomes: `Some(true)`, `Some(false)`, or `None` for "no value
//! supplied". It is total: every input produces an answer, nothing
//! panics, nothing errors, and the write path gains no new failure
//! modes.

use crate::value::FieldValue;

/// Textual spellings accepted as logical true, after trim and case-fold
const TRUE_WORDS: &[&str] = &["1", "true", "t", "yes", "y", "on"];

/// Textual spellings accepted as logical false; the empty string is false
const FALSE_WORDS: &[&str] = &["0", "false", "f", "no", "n", "off", ""];

/// Normalize an arbitrary field value to a tri-state logical result.
///
/// Rules, applied in order:
///
/// 1. `Absent` → `None`
/// 2. `Bool` → returned unchanged
/// 3. Numeric → `false` iff numerically zero
/// 4. Text → trimmed and case-folded, matched against the fixed word
///    tables; otherwise parsed as a number (zero → `false`); text that
///    is neither a known word nor a number defaults to `true`
/// 5. Anything else → generic truthiness
#[must_use]
pub fn normalize_bool(value: &FieldValue) -> Option<bool> {
    match value {
        FieldValue::Absent => None,
        FieldValue::Bool(b) => Some(*b),
        FieldValue::Int(n) => Some(*n != 0),
        FieldValue::Float(f) => Some(*f != 0.0),
        FieldValue::Text(s) => Some(normalize_text(s)),
        other => Some(other.truthy()),
    }
}

fn normalize_text(raw: &str) -> bool {
    let folded = raw.trim().to_lowercase();
    if TRUE_WORDS.contains(&folded.as_str()) {
        return true;
    }
    if FALSE_WORDS.contains(&folded.as_str()) {
        return false;
    }
    // Unrecognized words that still parse numerically follow the numeric
    // rule; anything else is treated as present-and-true.
    match folded.parse::<f64>() {
        Ok(n) => n != 0.0,
        Err(_) => true,
    }
}
