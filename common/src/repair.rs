//! Repairs the two systematic defects of the device firmware's `/status`
//! body before structural parsing: bare `nan` tokens where a number should
//! be, and a dropped comma between the `fan` field and the key after it.
//!
//! The defect list is exhaustive for the documented firmware revision. A new
//! malformation gets its own explicitly tested rewrite here, not a broadened
//! pattern.

use serde_json::Value;

use crate::error::PayloadError;

/// Pure string repair. Safe to run on well-formed payloads (no-op) and
/// idempotent: repairing twice yields the same text as repairing once.
pub fn repair_payload(raw: &str) -> String {
    insert_fan_separator(&rewrite_nan_tokens(raw))
}

/// Repair then parse. On failure the original raw body rides along in the
/// error so the caller can log it; an unparseable response is never turned
/// into a silent empty document.
pub fn parse_status(raw: &str) -> Result<Value, PayloadError> {
    let repaired = repair_payload(raw);
    serde_json::from_str(&repaired).map_err(|source| PayloadError::Malformed {
        raw: raw.to_string(),
        source,
    })
}

/// The firmware prints unquoted `nan` (any casing) when a sensor read
/// faults. `nan` is not valid JSON, so rewrite each whole-word occurrence
/// outside string literals to `null`; the normalizer later coerces that
/// null to 0.
fn rewrite_nan_tokens(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            c if is_word_char(c) => {
                let mut word = String::new();
                word.push(c);
                while let Some(&next) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                if word.eq_ignore_ascii_case("nan") {
                    out.push_str("null");
                } else {
                    out.push_str(&word);
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// The firmware drops the comma after the `fan` field: `"fan":true"nextKey"`.
/// Detect the literal key, a boolean value, and an immediately following
/// quote, and insert the separator. Anything else after the boolean (comma,
/// closing brace) means the payload is fine there and is left untouched.
fn insert_fan_separator(raw: &str) -> String {
    const KEY: &str = "\"fan\"";

    let mut out = String::with_capacity(raw.len() + 1);
    let mut cursor = 0;

    while let Some(found) = raw[cursor..].find(KEY) {
        let key_end = cursor + found + KEY.len();
        out.push_str(&raw[cursor..key_end]);
        cursor = key_end;

        if let Some(offset) = boolean_value_end(&raw[cursor..]) {
            let value_end = cursor + offset;
            out.push_str(&raw[cursor..value_end]);
            cursor = value_end;
            if raw[cursor..].starts_with('"') {
                out.push(',');
            }
        }
    }

    out.push_str(&raw[cursor..]);
    out
}

/// Matches `\s*:\s*(true|false)` and returns the offset one past the boolean
/// literal, or `None` if the text after the key is not that shape.
fn boolean_value_end(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut idx = 0;

    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }
    if bytes.get(idx) != Some(&b':') {
        return None;
    }
    idx += 1;
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }

    ["true", "false"]
        .iter()
        .find(|literal| rest[idx..].starts_with(*literal))
        .map(|literal| idx + literal.len())
}
