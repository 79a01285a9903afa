//! Field encodings of the text protocol.
//!
//! Numbers are unsigned lowercase hexadecimal without prefix, booleans are
//! `true`/`false`, and strings are standard padded base64 of their UTF-8
//! bytes so they never contain the separators.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::core::{JassError, Result};

/// Separator between the fields of a line.
pub const FIELD_SEPARATOR: char = ' ';

/// Separator inside a composite field.
pub const COMPONENT_SEPARATOR: char = ',';

#[must_use]
pub fn serialize_u32(value: u32) -> String {
    format!("{value:x}")
}

pub fn deserialize_u32(s: &str) -> Result<u32> {
    u32::from_str_radix(s, 16).map_err(|e| JassError::Protocol(format!("bad hex {s:?}: {e}")))
}

#[must_use]
pub fn serialize_u64(value: u64) -> String {
    format!("{value:x}")
}

pub fn deserialize_u64(s: &str) -> Result<u64> {
    u64::from_str_radix(s, 16).map_err(|e| JassError::Protocol(format!("bad hex {s:?}: {e}")))
}

#[must_use]
pub fn serialize_bool(value: bool) -> String {
    value.to_string()
}

pub fn deserialize_bool(s: &str) -> Result<bool> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(JassError::Protocol(format!("bad boolean {s:?}"))),
    }
}

#[must_use]
pub fn serialize_string(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

pub fn deserialize_string(s: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(s)
        .map_err(|e| JassError::Protocol(format!("bad base64 {s:?}: {e}")))?;
    String::from_utf8(bytes).map_err(|e| JassError::Protocol(format!("name is not UTF-8: {e}")))
}

/// Join already-serialized fields with `separator`.
#[must_use]
pub fn join<S: AsRef<str>>(separator: char, fields: &[S]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(separator);
        }
        line.push_str(field.as_ref());
    }
    line
}

/// Split `s` into exactly `N` fields.
pub fn split<const N: usize>(separator: char, s: &str) -> Result<[&str; N]> {
    let mut fields = [""; N];
    let mut parts = s.split(separator);
    for field in &mut fields {
        *field = parts
            .next()
            .ok_or_else(|| JassError::Protocol(format!("expected {N} fields in {s:?}")))?;
    }
    if parts.next().is_some() {
        return Err(JassError::Protocol(format!("expected {N} fields in {s:?}")));
    }
    Ok(fields)
}
