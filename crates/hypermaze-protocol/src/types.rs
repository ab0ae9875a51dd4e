//! Identity and profile types shared by every layer.
//!
//! These are the small values that show up inside almost every event on
//! the wire: who a user is, which session they belong to, and the public
//! profile other members get to see.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a connected user.
///
/// Newtype wrapper around `u64` so a `UserId` can never be passed where a
/// `SessionId` is expected, even though both are small integers on the
/// wire. `#[serde(transparent)]` keeps the JSON shape a plain number:
/// `UserId(42)` becomes `42`, which is what browser clients expect.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// A unique identifier for a game session (a group navigating one maze).
///
/// Same newtype pattern as [`UserId`]. Players type this number into the
/// client to join a friend's session, so it stays small and numeric.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Collaborator: the public face of a user
// ---------------------------------------------------------------------------

/// The public profile of a session member.
///
/// Sent in rosters and join notifications. `name` is `None` until the
/// user calls `setName`, and serializes as `null` in that case. The id
/// goes out as `_id`, which is what deployed clients read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    /// The member's user id.
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Display name, if the user has set one.
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Falsy: the literal `false` payload
// ---------------------------------------------------------------------------

/// A payload that is always the JSON literal `false`.
///
/// Clients test callbacks for truthiness: a failed join answers `false`
/// instead of an object, and the exit acknowledgment is `false` too.
/// A unit struct with hand-written serde impls lets those payloads live
/// inside ordinary Rust enums while keeping the exact wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Falsy;

impl Serialize for Falsy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(false)
    }
}

impl<'de> Deserialize<'de> for Falsy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match bool::deserialize(deserializer)? {
            false => Ok(Falsy),
            true => Err(serde::de::Error::custom("expected `false`")),
        }
    }
}
