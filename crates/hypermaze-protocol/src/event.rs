//! Named events exchanged between browser clients and the server.
//!
//! Every frame on the wire is one event: a name plus an optional payload.
//! `#[serde(tag = "event", content = "data")]` produces "adjacently
//! tagged" JSON, so a join request looks like
//!
//! ```text
//! { "event": "joinGame", "data": 417 }
//! ```
//!
//! and events without a payload simply omit `data`:
//!
//! ```text
//! { "event": "startGame" }
//! ```

use serde::{Deserialize, Serialize};

use crate::{Collaborator, Falsy, GameView, SessionId, UserId};

// ---------------------------------------------------------------------------
// Client → Server
// ---------------------------------------------------------------------------

/// Events a client may send. Each one is scoped to the sending connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Sets the display name shown to other members.
    SetName(String),
    /// Opens a new session with the sender as its only member.
    CreateGame,
    /// Joins an existing session by id.
    JoinGame(SessionId),
    /// Leaves the current session.
    ExitGame,
    /// Builds the maze and hands every member their slice.
    StartGame,
    /// Moves the shared position along the sender's two axes.
    Movement([i64; 2]),
}

// ---------------------------------------------------------------------------
// Server → Client
// ---------------------------------------------------------------------------

/// Reply payload for a successful `createGame`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSession {
    #[serde(rename = "_id", alias = "id")]
    pub id: SessionId,
    pub user: Collaborator,
}

/// Reply payload for a successful `joinGame`: the full roster in join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedSession {
    #[serde(rename = "_id", alias = "id")]
    pub id: SessionId,
    pub collaborators: Vec<Collaborator>,
}

/// Either the joined session or the literal `false`.
///
/// `#[serde(untagged)]` tries each variant in order, so on the wire this
/// is just the object or just `false`, with no wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinGameReply {
    Joined(JoinedSession),
    Rejected(Falsy),
}

impl JoinGameReply {
    /// Returns `true` for the falsy rejection.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Events the server sends to one or more connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// The identity assigned to this connection.
    SetId(UserId),
    CreateGameCallback(CreatedSession),
    JoinGameCallback(JoinGameReply),
    /// A new member joined the caller's session.
    AddCollab(Collaborator),
    /// A member left the caller's session.
    RemoveCollab(UserId),
    /// Acknowledges `exitGame`. Always `false`.
    ExitGameCallback(Falsy),
    /// A member dropped their connection; the session is gone.
    Disconnected(UserId),
    GameStarted(GameView),
    GameUpdated(GameView),
    /// The shared position reached the goal.
    FinalPosition,
}

impl ServerEvent {
    /// The event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetId(_) => "setId",
            Self::CreateGameCallback(_) => "createGameCallback",
            Self::JoinGameCallback(_) => "joinGameCallback",
            Self::AddCollab(_) => "addCollab",
            Self::RemoveCollab(_) => "removeCollab",
            Self::ExitGameCallback(_) => "exitGameCallback",
            Self::Disconnected(_) => "disconnected",
            Self::GameStarted(_) => "gameStarted",
            Self::GameUpdated(_) => "gameUpdated",
            Self::FinalPosition => "finalPosition",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // ClientEvent: shapes clients actually send
    // =====================================================================

    #[test]
    fn test_client_event_join_game_parses() {
        let ev: ClientEvent =
            serde_json::from_str(r#"{"event":"joinGame","data":12}"#).unwrap();
        assert_eq!(ev, ClientEvent::JoinGame(SessionId(12)));
    }

    #[test]
    fn test_client_event_without_data_parses() {
        let ev: ClientEvent =
            serde_json::from_str(r#"{"event":"startGame"}"#).unwrap();
        assert_eq!(ev, ClientEvent::StartGame);
    }

    #[test]
    fn test_client_event_movement_parses_pair() {
        let ev: ClientEvent =
            serde_json::from_str(r#"{"event":"movement","data":[1,-1]}"#)
                .unwrap();
        assert_eq!(ev, ClientEvent::Movement([1, -1]));
    }

    #[test]
    fn test_client_event_set_name_parses() {
        let ev: ClientEvent =
            serde_json::from_str(r#"{"event":"setName","data":"ada"}"#).unwrap();
        assert_eq!(ev, ClientEvent::SetName("ada".into()));
    }

    #[test]
    fn test_client_event_unknown_name_is_error() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str(r#"{"event":"teleport","data":[0,0]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_event_movement_wrong_arity_is_error() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str(r#"{"event":"movement","data":[1]}"#);
        assert!(result.is_err());
    }

    // =====================================================================
    // ServerEvent: JSON shapes the client SDK relies on
    // =====================================================================

    #[test]
    fn test_server_event_set_id_json_format() {
        let json = serde_json::to_value(ServerEvent::SetId(UserId(4))).unwrap();
        assert_eq!(json["event"], "setId");
        assert_eq!(json["data"], 4);
    }

    #[test]
    fn test_server_event_join_rejected_is_false() {
        let ev = ServerEvent::JoinGameCallback(JoinGameReply::Rejected(Falsy));
        let json = serde_json::to_value(ev).unwrap();
        assert_eq!(json["event"], "joinGameCallback");
        assert_eq!(json["data"], false);
    }

    #[test]
    fn test_server_event_join_accepted_lists_collaborators() {
        let ev = ServerEvent::JoinGameCallback(JoinGameReply::Joined(
            JoinedSession {
                id: SessionId(8),
                collaborators: vec![
                    Collaborator {
                        id: UserId(1),
                        name: Some("ada".into()),
                    },
                    Collaborator {
                        id: UserId(2),
                        name: None,
                    },
                ],
            },
        ));
        let json = serde_json::to_value(ev).unwrap();
        assert_eq!(json["data"]["_id"], 8);
        assert_eq!(json["data"]["collaborators"][0]["name"], "ada");
        assert_eq!(json["data"]["collaborators"][1]["_id"], 2);
    }

    #[test]
    fn test_join_game_reply_parses_both_shapes() {
        let rejected: JoinGameReply = serde_json::from_str("false").unwrap();
        assert!(rejected.is_rejected());

        let joined: JoinGameReply =
            serde_json::from_str(r#"{"id":3,"collaborators":[]}"#).unwrap();
        assert!(!joined.is_rejected());
    }

    #[test]
    fn test_server_event_final_position_has_no_data() {
        let json = serde_json::to_value(ServerEvent::FinalPosition).unwrap();
        assert_eq!(json["event"], "finalPosition");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_server_event_name_matches_serialized_tag() {
        let events = [
            ServerEvent::RemoveCollab(UserId(1)),
            ServerEvent::ExitGameCallback(Falsy),
            ServerEvent::Disconnected(UserId(2)),
            ServerEvent::FinalPosition,
        ];
        for ev in events {
            let json = serde_json::to_value(&ev).unwrap();
            assert_eq!(json["event"], ev.name());
        }
    }
}
