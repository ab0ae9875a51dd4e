//! Users: one entry per live connection.
//!
//! A user is created the moment a connection is accepted and removed when
//! it closes. In between the coordinator fills in a display name, the
//! session the user belongs to, and (once that session starts) the two
//! maze axes the user looks through.

use std::collections::HashMap;

use hypermaze_protocol::{Collaborator, ServerEvent, SessionId, UserId};
use tokio::sync::mpsc;

use crate::{IdAllocator, SessionError};

/// Outbound channel to a user's connection.
///
/// The connection handler drains the receiving end and writes frames to
/// the socket. Sending never blocks, so fan-out can happen while the
/// registries are locked.
pub type ConnectionSender = mpsc::UnboundedSender<ServerEvent>;

/// The two axes of the N-dimensional maze a member sees as a 2D slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimensionPair {
    pub x: usize,
    pub y: usize,
}

impl DimensionPair {
    /// The pair for the member at `index` (join order) in a maze with
    /// `dimensions` axes: `(index mod d, (index + 1) mod d)`.
    ///
    /// Consecutive members share one axis, so every pair is distinct while
    /// the slices overlap like links in a chain.
    pub fn for_member(index: usize, dimensions: usize) -> Self {
        Self {
            x: index % dimensions,
            y: (index + 1) % dimensions,
        }
    }

    /// Returns `true` if `axis` is one of the pair.
    pub fn contains(&self, axis: usize) -> bool {
        self.x == axis || self.y == axis
    }
}

/// A connected user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Where events for this user go.
    pub connection: ConnectionSender,
    /// Display name, set by `setName`.
    pub name: Option<String>,
    /// The session this user is in, if any.
    pub session: Option<SessionId>,
    /// Assigned when the user's session starts.
    pub dimensions: Option<DimensionPair>,
}

impl User {
    /// The profile other members see.
    pub fn profile(&self) -> Collaborator {
        Collaborator {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// Queues an event for this user's connection.
    ///
    /// Returns `false` if the connection is already gone; the event is
    /// dropped in that case.
    pub fn send(&self, event: ServerEvent) -> bool {
        self.connection.send(event).is_ok()
    }
}

/// Every connected user, keyed by id.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<UserId, User>,
    ids: IdAllocator,
}

impl UserRegistry {
    /// Creates an empty registry drawing ids from `ids`.
    pub fn new(ids: IdAllocator) -> Self {
        Self {
            users: HashMap::new(),
            ids,
        }
    }

    /// Registers a new connection with no name and no session.
    ///
    /// # Errors
    /// Returns [`SessionError::IdSpaceExhausted`] when the server already
    /// holds as many users as the id space allows.
    pub fn register(&mut self, connection: ConnectionSender) -> Result<UserId, SessionError> {
        let id = UserId(self.ids.allocate()?);
        self.users.insert(
            id,
            User {
                id,
                connection,
                name: None,
                session: None,
                dimensions: None,
            },
        );
        Ok(id)
    }

    /// Removes a user and frees their id for reuse.
    pub fn remove(&mut self, id: UserId) -> Option<User> {
        let user = self.users.remove(&id)?;
        self.ids.release(id.0);
        Some(user)
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Looks up a user, turning a miss into [`SessionError::UserNotFound`].
    pub fn require(&self, id: UserId) -> Result<&User, SessionError> {
        self.users.get(&id).ok_or(SessionError::UserNotFound(id))
    }

    /// Mutable variant of [`require`](Self::require).
    pub fn require_mut(&mut self, id: UserId) -> Result<&mut User, SessionError> {
        self.users.get_mut(&id).ok_or(SessionError::UserNotFound(id))
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    /// The public profile of a user, if registered.
    pub fn profile(&self, id: UserId) -> Option<Collaborator> {
        self.users.get(&id).map(User::profile)
    }

    /// Queues an event for a user. Unknown users and closed connections
    /// are skipped; returns whether the event was queued.
    pub fn send_to(&self, id: UserId, event: ServerEvent) -> bool {
        match self.users.get(&id) {
            Some(user) => user.send(event),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
