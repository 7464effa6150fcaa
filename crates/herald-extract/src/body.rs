//! Bounded body reader.

use crate::DecodeError;
use bytes::Bytes;
use http_body::Body;
use http_body_util::{BodyExt, LengthLimitError, Limited};

/// Collects a streaming body into memory, stopping at `limit` bytes.
///
/// The ceiling is enforced while reading, so an oversized upload is cut off
/// instead of buffered. A stream that fails part-way (the client hung up or
/// the request was cancelled) is reported as truncated input.
///
/// # Errors
///
/// - [`DecodeError::TooLarge`] when the stream yields more than `limit` bytes
/// - [`DecodeError::Truncated`] when the stream errors before completing
pub async fn read_body<B>(body: B, limit: usize) -> Result<Bytes, DecodeError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(DecodeError::TooLarge { limit })
        }
        Err(err) => {
            tracing::debug!(error = %err, "request body stream ended early");
            Err(DecodeError::Truncated)
        }
    }
}
