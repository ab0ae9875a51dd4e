//! Movement synchronization.
//!
//! A session shares one position vector. Each member steers it along
//! their own two axes, and after every move every member gets a fresh
//! view through their own slice. Reaching the goal is checked on the
//! whole vector, so any member's move can win the game for everyone.

use hypermaze_maze::{MazeEngine, MazeGame};
use hypermaze_protocol::{GameView, GoalView, OverallView, ServerEvent, UserId};
use hypermaze_session::{DimensionPair, SessionError};

use crate::{Coordinator, CoordinatorError};

/// What a move did to the shared position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The shared position after the move.
    pub position: Vec<i64>,
    /// `true` when the position now equals the goal on every axis.
    pub reached_goal: bool,
}

impl<M: MazeEngine> Coordinator<M> {
    /// Applies `delta` along the mover's axes and sends every member their
    /// updated view, in join order. If the goal was reached each member
    /// also gets `finalPosition` right after their update.
    ///
    /// Positions aren't checked against walls; the client only offers
    /// legal moves.
    ///
    /// # Errors
    /// [`CoordinatorError::NotInSession`] or [`CoordinatorError::NotStarted`]
    /// when there is no running game to move in. Nothing is sent.
    pub fn move_player(
        &mut self,
        user_id: UserId,
        delta: [i64; 2],
    ) -> Result<MoveOutcome, CoordinatorError> {
        let user = self.users.require(user_id)?;
        let session_id = user
            .session
            .ok_or(CoordinatorError::NotInSession(user_id))?;
        let pair = user
            .dimensions
            .ok_or(CoordinatorError::NotStarted(session_id))?;

        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or(SessionError::SessionNotFound(session_id))?;
        let game = session
            .game
            .as_mut()
            .ok_or(CoordinatorError::NotStarted(session_id))?;

        apply_delta(&mut game.position, pair, delta);
        let outcome = MoveOutcome {
            position: game.position.clone(),
            reached_goal: reached_goal(&game.position, &game.goal),
        };
        let members = session.members.clone();

        for member in &members {
            if let Some(view) = self.view_for(*member) {
                self.users.send_to(*member, ServerEvent::GameUpdated(view));
            }
            if outcome.reached_goal {
                self.users.send_to(*member, ServerEvent::FinalPosition);
            }
        }

        if outcome.reached_goal {
            tracing::info!(%user_id, %session_id, "goal reached");
        } else {
            tracing::trace!(%user_id, %session_id, position = ?outcome.position, "moved");
        }
        Ok(outcome)
    }

    /// The current view for one user, or `None` if they aren't in a
    /// running game.
    pub fn view_for(&self, user_id: UserId) -> Option<GameView> {
        let user = self.users.get(user_id)?;
        let pair = user.dimensions?;
        let game = self.sessions.get(user.session?)?.game.as_ref()?;
        Some(build_view(&self.engine, game, pair))
    }
}

/// Builds the view one member sees through `pair`.
pub fn build_view<M: MazeEngine>(
    engine: &M,
    game: &MazeGame<M::Maze>,
    pair: DimensionPair,
) -> GameView {
    let component = |v: &[i64], axis: usize| v.get(axis).copied().unwrap_or_default();

    GameView {
        blocks: game.block_size,
        dimensions: game.dimensions,
        map: engine.project(&game.maze, &game.position, pair.x, pair.y),
        position: [
            component(&game.position, pair.x),
            component(&game.position, pair.y),
        ],
        goal: GoalView {
            position: [component(&game.goal, pair.x), component(&game.goal, pair.y)],
            same_projection: same_projection(&game.position, &game.goal, pair),
        },
        overall: OverallView {
            player: game.position.clone(),
            goal: game.goal.clone(),
        },
        coordinates: [pair.x, pair.y],
    }
}

/// Adds `delta[0]` along `pair.x` and `delta[1]` along `pair.y`.
/// Axes outside the vector are ignored.
pub fn apply_delta(position: &mut [i64], pair: DimensionPair, delta: [i64; 2]) {
    if let Some(x) = position.get_mut(pair.x) {
        *x = x.saturating_add(delta[0]);
    }
    if let Some(y) = position.get_mut(pair.y) {
        *y = y.saturating_add(delta[1]);
    }
}

/// `true` when `position` equals `goal` component-wise.
pub fn reached_goal(position: &[i64], goal: &[i64]) -> bool {
    position == goal
}

/// `true` when the goal lies on the slice spanned by `pair` through
/// `position`: every axis outside the pair already matches.
pub fn same_projection(position: &[i64], goal: &[i64], pair: DimensionPair) -> bool {
    position
        .iter()
        .zip(goal)
        .enumerate()
        .all(|(axis, (p, g))| pair.contains(axis) || p == g)
}
