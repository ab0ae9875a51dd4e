//! The session coordinator: registration, session lifecycle, teardown.
//!
//! Every inbound client event ends up as one method call here. Each call
//! runs to completion against the two registries, queues whatever events
//! the affected connections need, and returns a typed result to the
//! caller. Queuing is non-blocking, so nothing suspends mid-mutation.

use hypermaze_maze::{MazeEngine, MazeGame};
use hypermaze_protocol::{
    Collaborator, CreatedSession, Falsy, JoinGameReply, JoinedSession, ServerEvent, SessionId,
    UserId,
};
use hypermaze_session::{
    ConnectionSender, DimensionPair, GameSession, IdAllocator, SessionError, SessionRegistry, User,
    UserRegistry,
};

use crate::{CoordinatorConfig, CoordinatorError};

/// Owns the user and session registries and the maze engine.
///
/// Not thread-safe on its own; the server keeps it behind one mutex so
/// events are applied one at a time.
pub struct Coordinator<M: MazeEngine> {
    pub(crate) users: UserRegistry,
    pub(crate) sessions: SessionRegistry<MazeGame<M::Maze>>,
    pub(crate) engine: M,
    config: CoordinatorConfig,
}

impl<M: MazeEngine> Coordinator<M> {
    /// Creates a coordinator with empty registries over the default id space.
    pub fn new(engine: M, config: CoordinatorConfig) -> Self {
        Self::with_registries(
            UserRegistry::new(IdAllocator::default()),
            SessionRegistry::new(IdAllocator::default()),
            engine,
            config,
        )
    }

    /// Creates a coordinator over registries supplied by the caller.
    pub fn with_registries(
        users: UserRegistry,
        sessions: SessionRegistry<MazeGame<M::Maze>>,
        engine: M,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            engine,
            config,
        }
    }

    // =====================================================================
    // Operations
    // =====================================================================

    /// Registers a new connection and sends it `setId`.
    ///
    /// # Errors
    /// Fails with [`SessionError::IdSpaceExhausted`] when the server is
    /// at its user cap. Nothing is sent in that case.
    pub fn register(&mut self, connection: ConnectionSender) -> Result<UserId, CoordinatorError> {
        let user_id = self.users.register(connection)?;
        self.users.send_to(user_id, ServerEvent::SetId(user_id));
        tracing::info!(%user_id, users = self.users.len(), "user registered");
        Ok(user_id)
    }

    /// Stores a display name. Nothing is broadcast.
    pub fn set_name(&mut self, user_id: UserId, name: String) -> Result<(), CoordinatorError> {
        self.users.require_mut(user_id)?.name = Some(name);
        Ok(())
    }

    /// Opens a session with `user_id` as its only member and replies with
    /// `createGameCallback`. A user already in a session leaves it first.
    pub fn create_session(&mut self, user_id: UserId) -> Result<SessionId, CoordinatorError> {
        self.users.require(user_id)?;
        self.leave_current(user_id);

        let session_id = self.sessions.create(user_id)?;
        let user = self.users.require_mut(user_id)?;
        user.session = Some(session_id);

        user.send(ServerEvent::CreateGameCallback(CreatedSession {
            id: session_id,
            user: user.profile(),
        }));
        tracing::info!(%user_id, %session_id, "session created");
        Ok(session_id)
    }

    /// Adds `user_id` to `session_id`, tells the existing members, and
    /// replies with the full roster.
    ///
    /// When the join is refused the caller gets `joinGameCallback(false)`
    /// and the registries are left untouched.
    pub fn join_session(
        &mut self,
        user_id: UserId,
        session_id: SessionId,
    ) -> Result<Vec<Collaborator>, CoordinatorError> {
        self.users.require(user_id)?;

        if let Err(e) = self.check_joinable(user_id, session_id) {
            self.users.send_to(
                user_id,
                ServerEvent::JoinGameCallback(JoinGameReply::Rejected(Falsy)),
            );
            tracing::debug!(%user_id, %session_id, error = %e, "join refused");
            return Err(e);
        }

        let already_member = self
            .sessions
            .get(session_id)
            .is_some_and(|s| s.is_member(user_id));

        if !already_member {
            self.leave_current(user_id);

            // Existing members hear about the newcomer before it is subscribed.
            if let Some(profile) = self.users.profile(user_id) {
                self.broadcast(session_id, None, ServerEvent::AddCollab(profile));
            }
            self.sessions.add_member(session_id, user_id)?;
            self.users.require_mut(user_id)?.session = Some(session_id);

            tracing::info!(%user_id, %session_id, "user joined session");
        }

        let collaborators = self.roster(session_id);
        self.users.send_to(
            user_id,
            ServerEvent::JoinGameCallback(JoinGameReply::Joined(JoinedSession {
                id: session_id,
                collaborators: collaborators.clone(),
            })),
        );
        Ok(collaborators)
    }

    /// Takes `user_id` out of their session (if any), tells the remaining
    /// members, and acknowledges with `exitGameCallback(false)`.
    ///
    /// Safe to call repeatedly; a user outside any session just gets the
    /// acknowledgment.
    pub fn exit_session(&mut self, user_id: UserId) -> Result<(), CoordinatorError> {
        self.users.require(user_id)?;
        self.leave_current(user_id);
        self.users.send_to(user_id, ServerEvent::ExitGameCallback(Falsy));
        Ok(())
    }

    /// Builds a maze with one more dimension than there are members,
    /// assigns each member their axes by join order, and sends everyone
    /// their `gameStarted` view.
    ///
    /// Starting an already running session builds a fresh maze.
    pub fn start_session(&mut self, user_id: UserId) -> Result<SessionId, CoordinatorError> {
        let session_id = self
            .users
            .require(user_id)?
            .session
            .ok_or(CoordinatorError::NotInSession(user_id))?;
        let members = self
            .sessions
            .get(session_id)
            .ok_or(SessionError::SessionNotFound(session_id))?
            .members
            .clone();

        let dimensions = members.len() + 1;
        let game = self.engine.build(self.config.block_size, dimensions)?;

        for (index, member) in members.iter().enumerate() {
            if let Some(user) = self.users.get_mut(*member) {
                user.dimensions = Some(DimensionPair::for_member(index, dimensions));
            }
        }
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.game = Some(game);
        }

        for member in &members {
            if let Some(view) = self.view_for(*member) {
                self.users.send_to(*member, ServerEvent::GameStarted(view));
            }
        }

        tracing::info!(
            %user_id,
            %session_id,
            dimensions,
            members = members.len(),
            "session started"
        );
        Ok(session_id)
    }

    /// Removes a user for good. If they were in a session, every other
    /// member is told once and the whole session is torn down.
    pub fn disconnect(&mut self, user_id: UserId) -> Result<(), CoordinatorError> {
        let user = self
            .users
            .remove(user_id)
            .ok_or(SessionError::UserNotFound(user_id))?;
        tracing::info!(%user_id, users = self.users.len(), "user disconnected");

        let Some(session_id) = user.session else {
            return Ok(());
        };
        let Some(session) = self.sessions.remove(session_id) else {
            return Ok(());
        };

        for member in session.members.iter().filter(|m| **m != user_id) {
            if let Some(other) = self.users.get_mut(*member) {
                other.send(ServerEvent::Disconnected(user_id));
                other.session = None;
                other.dimensions = None;
            }
        }

        tracing::info!(
            %session_id,
            evicted = session.members.len().saturating_sub(1),
            "session destroyed after disconnect"
        );
        Ok(())
    }

    // =====================================================================
    // Queries
    // =====================================================================

    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn session(&self, session_id: SessionId) -> Option<&GameSession<MazeGame<M::Maze>>> {
        self.sessions.get(session_id)
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    pub fn sessions(&self) -> &SessionRegistry<MazeGame<M::Maze>> {
        &self.sessions
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Public profiles of a session's members, in join order.
    pub fn roster(&self, session_id: SessionId) -> Vec<Collaborator> {
        self.sessions
            .get(session_id)
            .map(|s| {
                s.members
                    .iter()
                    .filter_map(|m| self.users.profile(*m))
                    .collect()
            })
            .unwrap_or_default()
    }

    // =====================================================================
    // Internals
    // =====================================================================

    fn check_joinable(
        &self,
        user_id: UserId,
        session_id: SessionId,
    ) -> Result<(), CoordinatorError> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or(SessionError::SessionNotFound(session_id))?;
        if session.is_member(user_id) {
            return Ok(());
        }
        if session.is_started() {
            return Err(CoordinatorError::AlreadyStarted(session_id));
        }
        if session.members.len() >= self.config.max_members {
            return Err(CoordinatorError::SessionFull(session_id, session.members.len()));
        }
        Ok(())
    }

    /// Detaches a user from their current session without acknowledging.
    /// Remaining members get `removeCollab`; an emptied session is removed.
    fn leave_current(&mut self, user_id: UserId) {
        let Some(user) = self.users.get_mut(user_id) else {
            return;
        };
        user.dimensions = None;
        let Some(session_id) = user.session.take() else {
            return;
        };

        if self.sessions.remove_member(session_id, user_id).is_err() {
            tracing::debug!(%user_id, %session_id, "left a session that no longer exists");
            return;
        }
        self.broadcast(session_id, None, ServerEvent::RemoveCollab(user_id));
        tracing::info!(%user_id, %session_id, "user left session");

        if self
            .sessions
            .get(session_id)
            .is_some_and(|s| s.members.is_empty())
        {
            self.sessions.remove(session_id);
            tracing::info!(%session_id, "empty session destroyed");
        }
    }

    /// Queues `event` for every member of `session_id` in join order,
    /// optionally skipping one. Closed connections are skipped silently.
    pub(crate) fn broadcast(
        &self,
        session_id: SessionId,
        except: Option<UserId>,
        event: ServerEvent,
    ) {
        let Some(session) = self.sessions.get(session_id) else {
            return;
        };
        for member in &session.members {
            if Some(*member) != except {
                self.users.send_to(*member, event.clone());
            }
        }
    }
}
