//! Per-connection handler: registration, event routing, teardown.
//!
//! Each accepted connection gets its own Tokio task running this handler:
//!   1. Register → the coordinator assigns a user id and queues `setId`
//!   2. Spawn a writer that drains the user's outbound queue to the socket
//!   3. Loop: receive frames → check they are text → decode a `ClientEvent` → apply it
//!   4. On close, the drop guard disconnects the user

use std::sync::Arc;

use hypermaze_maze::MazeEngine;
use hypermaze_protocol::{ClientEvent, Codec, ProtocolError, ServerEvent, UserId};
use hypermaze_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::HypermazeError;
use crate::server::ServerState;

/// Disconnects the user when the handler exits, panics included.
///
/// `Drop` is synchronous, so the async lock is taken in a spawned task.
struct ConnectionGuard<M: MazeEngine, C: Codec> {
    user_id: UserId,
    state: Arc<ServerState<M, C>>,
}

impl<M: MazeEngine, C: Codec> Drop for ConnectionGuard<M, C> {
    fn drop(&mut self) {
        let user_id = self.user_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let mut coordinator = state.coordinator.lock().await;
            if let Err(e) = coordinator.disconnect(user_id) {
                tracing::debug!(%user_id, error = %e, "disconnect skipped");
            }
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<M, C>(
    conn: WebSocketConnection,
    state: Arc<ServerState<M, C>>,
) -> Result<(), HypermazeError>
where
    M: MazeEngine,
    C: Codec,
{
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (tx, rx) = mpsc::unbounded_channel();
    let registered = state.coordinator.lock().await.register(tx);
    let user_id = match registered {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(%conn_id, error = %e, "refusing connection");
            let _ = conn.close().await;
            return Err(e.into());
        }
    };
    let _guard = ConnectionGuard {
        user_id,
        state: Arc::clone(&state),
    };

    tokio::spawn(write_events(Arc::clone(&conn), Arc::clone(&state), rx));

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%user_id, "connection closed");
                break;
            }
            Err(e) => {
                tracing::debug!(%user_id, error = %e, "recv error");
                break;
            }
        };

        if let Err(e) = text_frame(&data) {
            tracing::debug!(%user_id, error = %e, "dropping frame");
            continue;
        }
        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%user_id, error = %e, "failed to decode event");
                continue;
            }
        };

        dispatch(&state, user_id, event).await;
    }

    // _guard drops here → disconnect fires.
    Ok(())
}

/// Clients only speak text. Binary frames are let through as long as
/// they hold valid UTF-8.
fn text_frame(data: &[u8]) -> Result<&str, ProtocolError> {
    std::str::from_utf8(data)
        .map_err(|e| ProtocolError::InvalidMessage(format!("frame is not UTF-8 text: {e}")))
}

/// Applies one client event. Refused events are logged and otherwise
/// ignored; any reply the client expects has already been queued.
async fn dispatch<M, C>(state: &ServerState<M, C>, user_id: UserId, event: ClientEvent)
where
    M: MazeEngine,
    C: Codec,
{
    let mut coordinator = state.coordinator.lock().await;
    let result = match event {
        ClientEvent::SetName(name) => coordinator.set_name(user_id, name),
        ClientEvent::CreateGame => coordinator.create_session(user_id).map(drop),
        ClientEvent::JoinGame(session_id) => {
            coordinator.join_session(user_id, session_id).map(drop)
        }
        ClientEvent::ExitGame => coordinator.exit_session(user_id),
        ClientEvent::StartGame => coordinator.start_session(user_id).map(drop),
        ClientEvent::Movement(delta) => coordinator.move_player(user_id, delta).map(drop),
    };

    if let Err(e) = result {
        tracing::debug!(%user_id, error = %e, "event ignored");
    }
}

/// Drains a user's outbound queue onto their socket.
///
/// Ends when the coordinator drops the user's sender (on disconnect) or
/// the socket stops accepting writes.
async fn write_events<M, C>(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState<M, C>>,
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
) where
    M: MazeEngine,
    C: Codec,
{
    let conn_id = conn.id();
    while let Some(event) = rx.recv().await {
        let bytes = match state.codec.encode(&event) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(%conn_id, event = event.name(), error = %e, "encode failed");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(%conn_id, error = %e, "send failed, stopping writer");
            break;
        }
    }
}
