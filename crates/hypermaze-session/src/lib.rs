//! Identity allocation and registries for Hypermaze.
//!
//! This crate owns the two tables the coordinator works on:
//!
//! 1. **Users** ([`UserRegistry`]): one entry per live connection
//! 2. **Sessions** ([`SessionRegistry`]): groups of users sharing a maze
//!
//! Both draw ids from a bounded [`IdAllocator`].
//!
//! # How it fits in the stack
//!
//! ```text
//! Coordinator (above)  ← creates/joins/starts sessions, moves players
//!     ↕
//! Registry Layer (this crate)  ← who is connected, who is with whom
//!     ↕
//! Protocol Layer (below)  ← provides UserId, SessionId, ServerEvent
//! ```
//!
//! Neither registry locks anything. The server wraps the coordinator that
//! owns them in a single mutex, so each event is applied to completion
//! before the next one starts.

mod error;
mod id;
mod session;
mod user;

pub use error::SessionError;
pub use id::{DEFAULT_ID_CAPACITY, IdAllocator};
pub use session::{GameSession, SessionRegistry};
pub use user::{ConnectionSender, DimensionPair, User, UserRegistry};
