//! Base64 transport encoding for audio.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use bhasha_types::ApiError;

/// Encode raw audio bytes for an `audioContent` field.
pub fn encode_audio(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode an `audioContent` value. Surrounding whitespace is ignored.
pub fn decode_audio(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded.trim())
}

/// Check that caller-supplied audio is non-empty, well-formed base64.
///
/// Malformed audio is a local failure: the request is never sent.
pub fn check_audio(encoded: &str) -> Result<(), ApiError> {
    match decode_audio(encoded) {
        Ok(bytes) if !bytes.is_empty() => Ok(()),
        Ok(_) => Err(ApiError::Local("audio content is empty".into())),
        Err(e) => Err(ApiError::Local(format!("audio is not valid base64: {e}"))),
    }
}
