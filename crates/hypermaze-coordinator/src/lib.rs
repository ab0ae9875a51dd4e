//! Session coordination and movement synchronization for Hypermaze.
//!
//! [`Coordinator`] is the state machine behind every client event. It owns
//! the user and session registries, asks a [`MazeEngine`] for mazes, and
//! queues outbound [`ServerEvent`]s on each user's connection channel.
//!
//! ```text
//! register ──► create/join ──► start ──► move … move ──► finalPosition
//!                  ▲   │
//!                  └── exit            disconnect tears the session down
//! ```
//!
//! Every method is synchronous. Callers that share a coordinator across
//! tasks wrap it in a mutex and hold the lock for one call at a time.
//!
//! [`MazeEngine`]: hypermaze_maze::MazeEngine
//! [`ServerEvent`]: hypermaze_protocol::ServerEvent

mod config;
mod coordinator;
mod error;
mod sync;

pub use config::{CoordinatorConfig, DEFAULT_BLOCK_SIZE, DEFAULT_MAX_MEMBERS};
pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use sync::{MoveOutcome, apply_delta, build_view, reached_goal, same_projection};
