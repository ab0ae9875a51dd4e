//! Game sessions: a group of users navigating one maze together.
//!
//! A session's member list doubles as its broadcast group. Order matters:
//! members are kept in join order, fan-out iterates in that order, and a
//! member's position in the list decides which maze axes they get when
//! the session starts.

use std::collections::HashMap;

use hypermaze_protocol::{SessionId, UserId};

use crate::{IdAllocator, SessionError};

/// One live session. `G` is the game state stored once the session starts.
#[derive(Debug, Clone)]
pub struct GameSession<G> {
    pub id: SessionId,
    /// Members in join order. Never contains duplicates.
    pub members: Vec<UserId>,
    /// `None` until the session is started.
    pub game: Option<G>,
}

impl<G> GameSession<G> {
    pub fn is_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    /// Zero-based join position of `user`, if a member.
    pub fn member_index(&self, user: UserId) -> Option<usize> {
        self.members.iter().position(|m| *m == user)
    }

    pub fn is_started(&self) -> bool {
        self.game.is_some()
    }
}

/// Every live session, keyed by id.
#[derive(Debug)]
pub struct SessionRegistry<G> {
    sessions: HashMap<SessionId, GameSession<G>>,
    ids: IdAllocator,
}

impl<G> SessionRegistry<G> {
    /// Creates an empty registry drawing ids from `ids`.
    pub fn new(ids: IdAllocator) -> Self {
        Self {
            sessions: HashMap::new(),
            ids,
        }
    }

    /// Opens a session whose only member is `owner`.
    ///
    /// # Errors
    /// Returns [`SessionError::IdSpaceExhausted`] when no session id is free.
    pub fn create(&mut self, owner: UserId) -> Result<SessionId, SessionError> {
        let id = SessionId(self.ids.allocate()?);
        self.sessions.insert(
            id,
            GameSession {
                id,
                members: vec![owner],
                game: None,
            },
        );
        Ok(id)
    }

    /// Tears a session down and frees its id.
    pub fn remove(&mut self, id: SessionId) -> Option<GameSession<G>> {
        let session = self.sessions.remove(&id)?;
        self.ids.release(id.0);
        Some(session)
    }

    pub fn get(&self, id: SessionId) -> Option<&GameSession<G>> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut GameSession<G>> {
        self.sessions.get_mut(&id)
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Appends `user` to the session's members.
    ///
    /// # Errors
    /// - [`SessionError::SessionNotFound`]: no such session
    /// - [`SessionError::AlreadyMember`]: `user` is already listed
    pub fn add_member(&mut self, id: SessionId, user: UserId) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::SessionNotFound(id))?;
        if session.is_member(user) {
            return Err(SessionError::AlreadyMember(user, id));
        }
        session.members.push(user);
        Ok(())
    }

    /// Removes `user` from the session's members, keeping the order of the
    /// rest. Returns `Ok(false)` if `user` wasn't a member.
    ///
    /// # Errors
    /// Returns [`SessionError::SessionNotFound`] if the session is gone.
    pub fn remove_member(&mut self, id: SessionId, user: UserId) -> Result<bool, SessionError> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::SessionNotFound(id))?;
        match session.member_index(user) {
            Some(index) => {
                session.members.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Ids of all live sessions, ascending.
    pub fn ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl<G> Default for SessionRegistry<G> {
    fn default() -> Self {
        Self::new(IdAllocator::default())
    }
}
