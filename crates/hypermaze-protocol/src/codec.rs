//! Codec trait and implementations for serializing/deserializing events.
//!
//! The server never touches JSON directly. It holds something that
//! implements [`Codec`] and asks it to turn [`ServerEvent`]s into bytes and
//! bytes into [`ClientEvent`]s. Swapping the wire format means swapping
//! the codec, nothing else.
//!
//! [`ServerEvent`]: crate::ServerEvent
//! [`ClientEvent`]: crate::ClientEvent

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes Rust values to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` because one codec is shared by every
/// connection task for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or
    /// don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that speaks JSON (via `serde_json`).
///
/// Browser clients build events with `JSON.stringify`, so this is the
/// default. Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use hypermaze_protocol::{ClientEvent, Codec, JsonCodec, SessionId};
///
/// let codec = JsonCodec;
///
/// let bytes = br#"{"event":"joinGame","data":7}"#;
/// let event: ClientEvent = codec.decode(bytes).unwrap();
/// assert_eq!(event, ClientEvent::JoinGame(SessionId(7)));
///
/// let back = codec.encode(&event).unwrap();
/// let again: ClientEvent = codec.decode(&back).unwrap();
/// assert_eq!(event, again);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
