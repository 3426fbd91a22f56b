//! `data:` URL encoding for PNG payloads.

use super::types::ExportError;
use base64::{Engine, engine::general_purpose::STANDARD};

/// Prefix of every PNG data URL produced and accepted here.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Wraps PNG bytes in a base64 data URL.
pub fn encode_png(png: &[u8]) -> String {
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len().div_ceil(3) * 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(png, &mut url);
    url
}

/// Returns whether `value` looks like a PNG data URL.
pub fn is_png_data_url(value: &str) -> bool {
    value.starts_with("data:image/png")
}

/// Strips the data URL prefix and decodes the PNG bytes.
///
/// A bare base64 payload (no prefix) is rejected; generation responses that
/// carry raw base64 go through [`decode_base64`] instead.
pub fn decode_png(url: &str) -> Result<Vec<u8>, ExportError> {
    let payload = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or(ExportError::NotPngDataUrl {
            expected: PNG_DATA_URL_PREFIX,
        })?;
    decode_base64(payload)
}

/// Decodes a raw base64 payload, ignoring surrounding whitespace.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, ExportError> {
    Ok(STANDARD.decode(payload.trim())?)
}

/// Turns a raw base64 PNG payload into a data URL without decoding it.
pub fn wrap_base64(payload: &str) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", payload.trim())
}
