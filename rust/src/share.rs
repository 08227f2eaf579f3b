//! Share-link payload codec.
//!
//! A vaccination card can be shared as a URL that carries the child's
//! completion map encoded as base64 over JSON (the web client produces the
//! same encoding with `btoa(JSON.stringify(...))`). The engine owns the
//! codec so both sides agree on the format.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use crate::models::CompletionMap;
use crate::schedule::find_entry;

/// Errors decoding a share payload.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Share payload is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    #[error("Share payload is not a completion object: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Encode a completion map as a base64 JSON share payload.
pub fn encode_share_payload(completion: &CompletionMap) -> Result<String, ShareError> {
    let json = serde_json::to_string(completion)?;
    Ok(STANDARD.encode(json))
}

/// Decode a share payload back into a completion map.
///
/// Keys not present in the schedule table are dropped: links minted
/// against an older or newer schedule should still import the doses this
/// build knows about.
pub fn decode_share_payload(payload: &str) -> Result<CompletionMap, ShareError> {
    let bytes = STANDARD.decode(payload.trim())?;
    let raw: CompletionMap = serde_json::from_slice(&bytes)?;
    Ok(raw
        .into_iter()
        .filter(|(key, _)| find_entry(key).is_some())
        .collect())
}
