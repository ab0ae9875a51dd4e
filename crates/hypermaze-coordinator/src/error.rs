//! Error types for the coordinator.

use hypermaze_maze::MazeError;
use hypermaze_protocol::{SessionId, UserId};
use hypermaze_session::SessionError;

/// Errors returned by coordinator operations.
///
/// None of these are fatal. The connection handler logs them and carries
/// on; where the client expects an answer (a failed join) the coordinator
/// has already sent it before returning the error.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    /// Unknown user or session, or the id space ran out.
    #[error(transparent)]
    Registry(#[from] SessionError),

    /// The maze engine couldn't build the requested shape.
    #[error(transparent)]
    Maze(#[from] MazeError),

    /// The user isn't in any session.
    #[error("user {0} is not in a session")]
    NotInSession(UserId),

    /// The session already has the configured maximum of members.
    #[error("session {0} is full ({1} members)")]
    SessionFull(SessionId, usize),

    /// The session's maze is already running; late joins aren't allowed.
    #[error("session {0} has already started")]
    AlreadyStarted(SessionId),

    /// The session hasn't been started yet, so there's nothing to move in.
    #[error("session {0} has not started")]
    NotStarted(SessionId),
}
