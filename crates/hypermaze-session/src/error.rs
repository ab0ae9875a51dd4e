//! Error types for the registry layer.

use hypermaze_protocol::{SessionId, UserId};

/// Errors that can occur while allocating ids or mutating registries.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Every id in the bounded space is in use. This caps the number of
    /// concurrent users (or sessions) the server can hold.
    #[error("id space exhausted: all {capacity} ids are in use")]
    IdSpaceExhausted { capacity: u64 },

    /// No user is registered under this id. Either the event arrived
    /// before registration finished or after the user disconnected.
    #[error("user {0} is not registered")]
    UserNotFound(UserId),

    /// No live session has this id (never existed, or already torn down).
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    /// The user is already listed in this session's members.
    #[error("user {0} is already a member of session {1}")]
    AlreadyMember(UserId, SessionId),
}
