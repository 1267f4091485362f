//! Interpretation of raw command output according to a metric's expected shape.
//!
//! PowerShell's `ConvertTo-Json` collapses a single-element collection into the bare
//! element: one scope ID arrives as `"10.0.0.0"` rather than `["10.0.0.0"]`, and one
//! record arrives as `{...}` rather than `[{...}]`. The output is therefore classified
//! by its first significant byte into a [`Payload`] before any shape rule runs, and the
//! collapsed forms are re-wrapped instead of being parsed and retried.

use super::{NormalizeError, NormalizedValue};
use crate::metrics::ExpectedShape;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Knobs for the normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Parse record-array documents with `serde_json` instead of passing them through.
    pub validate_records: bool,
}

/// Raw output classified by its first significant byte. Every variant holds the trimmed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Payload<'a> {
    Empty,
    QuotedScalar(&'a [u8]),
    Array(&'a [u8]),
    Object(&'a [u8]),
    Bare(&'a [u8]),
}

fn sniff(raw: &[u8]) -> Payload<'_> {
    let raw = raw.trim_ascii_start();
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw).trim_ascii();

    match raw.first() {
        None => Payload::Empty,
        Some(b'"') => Payload::QuotedScalar(raw),
        Some(b'[') => Payload::Array(raw),
        Some(b'{') => Payload::Object(raw),
        Some(_) => Payload::Bare(raw),
    }
}

/// Map raw command output onto the canonical value for `shape`.
pub fn normalize(raw: &[u8], shape: ExpectedShape, options: NormalizeOptions) -> Result<NormalizedValue, NormalizeError> {
    let payload = sniff(raw);
    match shape {
        ExpectedShape::ScalarInt => normalize_scalar(payload),
        ExpectedShape::StringList => normalize_list(payload),
        ExpectedShape::RecordArray => normalize_records(payload, options),
    }
}

fn normalize_scalar(payload: Payload<'_>) -> Result<NormalizedValue, NormalizeError> {
    let bytes = match payload {
        Payload::Empty => return Err(NormalizeError::EmptyResult),
        Payload::QuotedScalar(bytes) | Payload::Array(bytes) | Payload::Object(bytes) | Payload::Bare(bytes) => bytes,
    };

    core::str::from_utf8(bytes)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .map(NormalizedValue::Scalar)
        .ok_or_else(|| NormalizeError::MalformedScalar {
            text: String::from_utf8_lossy(bytes).into_owned(),
        })
}

fn normalize_list(payload: Payload<'_>) -> Result<NormalizedValue, NormalizeError> {
    match payload {
        Payload::Empty => Ok(NormalizedValue::EmptyList),

        Payload::QuotedScalar(bytes) => {
            let item: String = serde_json::from_slice(bytes).map_err(|e| NormalizeError::MalformedList {
                text: String::from_utf8_lossy(bytes).into_owned(),
                reason: e.to_string(),
            })?;
            Ok(NormalizedValue::List(vec![item]))
        }

        Payload::Array(bytes) | Payload::Object(bytes) | Payload::Bare(bytes) => {
            let items: Vec<String> = serde_json::from_slice(bytes).map_err(|e| NormalizeError::MalformedList {
                text: String::from_utf8_lossy(bytes).into_owned(),
                reason: e.to_string(),
            })?;

            if items.is_empty() {
                Ok(NormalizedValue::EmptyList)
            } else {
                Ok(NormalizedValue::List(items))
            }
        }
    }
}

fn normalize_records(payload: Payload<'_>, options: NormalizeOptions) -> Result<NormalizedValue, NormalizeError> {
    let document = match payload {
        Payload::Empty => "[]".to_string(),
        Payload::Array(bytes) => document_text(bytes)?.to_string(),
        Payload::Object(bytes) | Payload::QuotedScalar(bytes) | Payload::Bare(bytes) => {
            format!("[{}]", document_text(bytes)?)
        }
    };

    if options.validate_records {
        let _: serde_json::Value =
            serde_json::from_str(&document).map_err(|e| NormalizeError::MalformedDocument { reason: e.to_string() })?;
    }

    Ok(NormalizedValue::Document(document))
}

fn document_text(bytes: &[u8]) -> Result<&str, NormalizeError> {
    core::str::from_utf8(bytes).map_err(|e| NormalizeError::MalformedDocument { reason: e.to_string() })
}
