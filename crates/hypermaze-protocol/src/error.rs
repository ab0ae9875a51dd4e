//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding events.
///
/// Kept separate from transport errors: a `ProtocolError` means the bytes
/// arrived fine but didn't make sense as an event.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning an event into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, an unknown event name,
    /// or a payload of the wrong shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame arrived but isn't UTF-8 text, so it can't hold an event.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
