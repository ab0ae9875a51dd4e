//! Wire protocol for Hypermaze.
//!
//! This crate defines the language browser clients and the server speak:
//!
//! - **Identities** ([`UserId`], [`SessionId`], [`Collaborator`])
//! - **Events** ([`ClientEvent`], [`ServerEvent`]): one named event per frame
//! - **Views** ([`GameView`], [`Projection`]): what a member sees of the maze
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): events to/from bytes
//!
//! # Architecture
//!
//! ```text
//! Transport (bytes) → Protocol (events) → Coordinator (sessions, moves)
//! ```

mod codec;
mod error;
mod event;
mod types;
mod view;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use event::{ClientEvent, CreatedSession, JoinGameReply, JoinedSession, ServerEvent};
pub use types::{Collaborator, Falsy, SessionId, UserId};
pub use view::{GameView, GoalView, OverallView, Projection};
