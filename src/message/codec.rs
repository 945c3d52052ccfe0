// Message codec - compact binary encoding with hex and base64 text forms

use crate::message::InboundMessage;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode message: {0}")]
    EncodeError(String),

    #[error("Failed to decode message: {0}")]
    DecodeError(String),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid base64 string: {0}")]
    InvalidBase64(String),
}

/// Codec for inbound messages (postcard on the wire)
pub struct MessageCodec;

impl MessageCodec {
    /// Encode to binary bytes
    pub fn encode(message: &InboundMessage) -> Result<Vec<u8>, CodecError> {
        postcard::to_allocvec(message).map_err(|e| CodecError::EncodeError(e.to_string()))
    }

    /// Decode from binary bytes
    pub fn decode(bytes: &[u8]) -> Result<InboundMessage, CodecError> {
        postcard::from_bytes(bytes).map_err(|e| CodecError::DecodeError(e.to_string()))
    }

    pub fn encode_hex(message: &InboundMessage) -> Result<String, CodecError> {
        Ok(hex::encode(Self::encode(message)?))
    }

    pub fn decode_hex(hex_str: &str) -> Result<InboundMessage, CodecError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
        Self::decode(&bytes)
    }

    /// Encode to base64 (URL-safe, no padding)
    pub fn encode_base64(message: &InboundMessage) -> Result<String, CodecError> {
        Ok(URL_SAFE_NO_PAD.encode(Self::encode(message)?))
    }

    pub fn decode_base64(b64_str: &str) -> Result<InboundMessage, CodecError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(b64_str.trim())
            .map_err(|e| CodecError::InvalidBase64(e.to_string()))?;
        Self::decode(&bytes)
    }
}
