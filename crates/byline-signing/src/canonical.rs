//! Canonical JSON rendering.
//!
//! The authentication code is computed over a serialized form, so both the
//! signing and verification paths must render logically identical values to
//! byte-identical strings. This writer sorts object keys lexicographically
//! at every nesting level and uses compact separators; escaping and number
//! rendering match `serde_json`.

use serde_json::Value;

/// Render a JSON value in canonical form
///
/// Object keys are sorted lexicographically at every level, so two values
/// with identical logical content produce identical output regardless of
/// field insertion order. Array element order is preserved. Infallible for
/// any `Value`.
///
/// # Examples
///
/// ```
/// use byline_signing::canonical_string;
/// use serde_json::json;
///
/// let value = json!({"b": 1, "a": {"d": 2, "c": 3}});
/// assert_eq!(canonical_string(&value), r#"{"a":{"c":3,"d":2},"b":1}"#);
/// ```
pub fn canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        // Display for Number is identical to its JSON representation
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_escaped(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

/// Write a JSON string literal with serde_json-compatible escaping
fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
