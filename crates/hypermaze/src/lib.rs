//! # Hypermaze
//!
//! A multiplayer server for N-dimensional mazes. Players form a session,
//! and on start each member is handed a different pair of the maze's
//! axes. Everyone steers the same position, but each sees only their own
//! 2D slice of it, so the group has to cooperate to reach the goal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hypermaze::prelude::*;
//!
//! # async fn start() -> Result<(), HypermazeError> {
//! let server = HypermazeServer::builder()
//!     .config(ServerConfig::from_env()?)
//!     .build(CarvedMazeEngine::new())
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
pub use error::HypermazeError;
pub use server::{HypermazeServer, HypermazeServerBuilder};

/// Re-exports everything needed to run a server or talk to one.
pub mod prelude {
    pub use crate::{HypermazeError, HypermazeServer, HypermazeServerBuilder, ServerConfig};
    pub use hypermaze_coordinator::{Coordinator, CoordinatorConfig, CoordinatorError};
    pub use hypermaze_maze::{CarvedMazeEngine, MazeEngine, MazeError, MazeGame};
    pub use hypermaze_protocol::{
        ClientEvent, Codec, Collaborator, CreatedSession, Falsy, GameView, GoalView,
        JoinGameReply, JoinedSession, JsonCodec, OverallView, Projection, ServerEvent, SessionId,
        UserId,
    };
}
