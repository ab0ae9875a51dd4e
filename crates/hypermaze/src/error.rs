//! Unified error type for the Hypermaze server.

use hypermaze_coordinator::CoordinatorError;
use hypermaze_protocol::ProtocolError;
use hypermaze_session::SessionError;
use hypermaze_transport::TransportError;

/// Top-level error that wraps every crate-specific error.
///
/// `#[from]` on each variant lets `?` lift sub-crate errors straight into
/// this type.
#[derive(Debug, thiserror::Error)]
pub enum HypermazeError {
    /// Binding, accepting, or talking to a socket failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An event couldn't be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A coordinator operation was refused.
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),

    /// An environment setting couldn't be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}

impl From<SessionError> for HypermazeError {
    fn from(err: SessionError) -> Self {
        Self::Coordinator(err.into())
    }
}
