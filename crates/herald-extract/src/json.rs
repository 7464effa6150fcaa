//! Strict JSON body decoder.
//!
//! [`read_json`] decodes exactly one JSON value from the request body into a
//! typed destination and rejects anything else:
//!
//! | Condition | Error |
//! |---|---|
//! | body over the byte ceiling | [`DecodeError::TooLarge`] |
//! | empty or whitespace-only body | [`DecodeError::Empty`] |
//! | malformed syntax | [`DecodeError::Syntax`] |
//! | input ends mid-value | [`DecodeError::Truncated`] |
//! | wrong type for a named field | [`DecodeError::FieldType`] |
//! | wrong type at the top level | [`DecodeError::Type`] |
//! | key the destination does not declare | [`DecodeError::UnknownField`] |
//! | key given twice | [`DecodeError::DuplicateKey`] |
//! | required field absent | [`DecodeError::MissingField`] |
//! | anything after the first value | [`DecodeError::MultipleValues`] |
//!
//! Syntax is checked for the whole first value before it is matched against
//! the destination, so badly-formed input is always reported as such. Unknown
//! keys are rejected whether or not the destination type opts into
//! `#[serde(deny_unknown_fields)]`.

use crate::{DecodeError, ExtractionContext};
use serde::de::{Deserialize, DeserializeOwned, IgnoredAny};
use serde_json::error::Category;

/// Default byte ceiling for request bodies (1 MiB).
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Decodes the request body with the default 1 MiB ceiling.
///
/// # Errors
///
/// Returns the [`DecodeError`] describing why the body was rejected.
///
/// # Panics
///
/// Panics if the JSON reader reports an I/O failure, which an in-memory
/// body cannot produce.
///
/// # Example
///
/// ```rust
/// use herald_extract::{read_json, ExtractionContext};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CreateMovie {
///     title: String,
///     year: i32,
/// }
///
/// let ctx = ExtractionContext::builder()
///     .method(http::Method::POST)
///     .uri(http::Uri::from_static("/v1/movies"))
///     .body(r#"{"title": "Moana", "year": 2016}"#)
///     .build();
///
/// let input: CreateMovie = read_json(&ctx).unwrap();
/// assert_eq!(input.title, "Moana");
/// ```
pub fn read_json<T: DeserializeOwned>(ctx: &ExtractionContext) -> Result<T, DecodeError> {
    decode_json(ctx.body(), MAX_BODY_BYTES)
}

/// Decodes the request body with a caller-chosen ceiling.
///
/// # Errors
///
/// Returns the [`DecodeError`] describing why the body was rejected.
pub fn read_json_with_limit<T: DeserializeOwned>(
    ctx: &ExtractionContext,
    limit: usize,
) -> Result<T, DecodeError> {
    decode_json(ctx.body(), limit)
}

/// Decodes a single JSON value from raw bytes.
///
/// # Errors
///
/// Returns the [`DecodeError`] describing why the bytes were rejected.
///
/// # Panics
///
/// Panics if the JSON reader reports an I/O failure.
pub fn decode_json<T: DeserializeOwned>(body: &[u8], limit: usize) -> Result<T, DecodeError> {
    if body.len() > limit {
        return Err(DecodeError::TooLarge { limit });
    }

    if body.iter().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
        return Err(DecodeError::Empty);
    }

    check_syntax(body)?;

    let mut de = serde_json::Deserializer::from_slice(body);
    let mut unknown: Option<String> = None;
    let mut on_ignored = |path: serde_ignored::Path<'_>| {
        if unknown.is_none() {
            unknown = Some(path.to_string());
        }
    };

    let decoded: Result<T, _> =
        serde_path_to_error::deserialize(serde_ignored::Deserializer::new(&mut de, &mut on_ignored));

    // Keys are reported as soon as they are seen, so an unknown key always
    // precedes any later failure in the same document.
    if let Some(key) = unknown {
        return Err(DecodeError::UnknownField { key });
    }

    let value = decoded.map_err(|err| classify(body, &err))?;

    if de.end().is_err() {
        return Err(DecodeError::MultipleValues);
    }

    Ok(value)
}

/// Scans the first value without a destination so that malformed or
/// truncated input is reported before any shape mismatch.
fn check_syntax(body: &[u8]) -> Result<(), DecodeError> {
    let mut scan = serde_json::Deserializer::from_slice(body);
    match IgnoredAny::deserialize(&mut scan) {
        Ok(IgnoredAny) => Ok(()),
        Err(err) => match err.classify() {
            Category::Eof => Err(DecodeError::Truncated),
            Category::Syntax => Err(DecodeError::Syntax {
                offset: byte_offset(body, err.line(), err.column()),
            }),
            Category::Data | Category::Io => Ok(()),
        },
    }
}

/// Type-mismatch reasons reported by serde for a value the destination
/// cannot hold.
const TYPE_MISMATCH: [&str; 4] = [
    "invalid type",
    "invalid value",
    "invalid length",
    "unknown variant",
];

fn classify(body: &[u8], err: &serde_path_to_error::Error<serde_json::Error>) -> DecodeError {
    let inner = err.inner();
    let offset = byte_offset(body, inner.line(), inner.column());

    match inner.classify() {
        Category::Eof => DecodeError::Truncated,
        Category::Syntax => DecodeError::Syntax { offset },
        Category::Data => {
            let reason = strip_position(inner);
            let path = err.path();
            let parent = (path.to_string() != ".").then(|| path.to_string());
            let child = |name: &str| match &parent {
                Some(parent) => format!("{parent}.{name}"),
                None => name.to_string(),
            };

            if let Some(name) = quoted_name(&reason, "unknown field `") {
                return DecodeError::UnknownField { key: child(name) };
            }
            if let Some(name) = quoted_name(&reason, "duplicate field `") {
                return DecodeError::DuplicateKey { key: child(name) };
            }
            if let Some(name) = quoted_name(&reason, "missing field `") {
                return DecodeError::MissingField { field: child(name) };
            }

            if TYPE_MISMATCH.iter().any(|prefix| reason.starts_with(prefix)) {
                let named = path
                    .iter()
                    .any(|segment| matches!(segment, serde_path_to_error::Segment::Map { .. }));
                return match parent {
                    Some(field) if named => DecodeError::FieldType { field },
                    _ => DecodeError::Type { offset },
                };
            }

            tracing::debug!(error = %reason, "request body rejected by destination type");
            DecodeError::Invalid
        }
        Category::Io => panic!("json decoder contract violated: {inner}"),
    }
}

/// The backquoted name that follows `prefix` in a serde message.
fn quoted_name<'a>(reason: &'a str, prefix: &str) -> Option<&'a str> {
    reason
        .strip_prefix(prefix)
        .and_then(|rest| rest.split('`').next())
}

/// Converts serde_json's 1-based line/column into a byte offset.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let line_start: usize = body
        .split(|b| *b == b'\n')
        .take(line - 1)
        .map(|l| l.len() + 1)
        .sum();

    (line_start + column).min(body.len())
}

fn strip_position(err: &serde_json::Error) -> String {
    let message = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    match message.strip_suffix(&suffix) {
        Some(stripped) => stripped.to_string(),
        None => message,
    }
}
