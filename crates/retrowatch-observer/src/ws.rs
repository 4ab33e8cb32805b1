//! `WebSocket` handler for live change events.
//!
//! Clients connect to `GET /ws` and receive one JSON text frame per
//! change event:
//!
//! ```json
//! {"type":"game_update","generation":7,"timestamp":"...","data":{...}}
//! ```
//!
//! Each connection registers its own hub subscriber. If the client stops
//! reading and its queue fills, the hub drops it and the stream ends; the
//! handler then closes the socket. Whatever ends the connection, the
//! handler deregisters on the way out.

use std::sync::Arc;

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt as _, StreamExt as _};
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` and start streaming events.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_updates(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Why the forwarding loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// The client closed or errored.
    Client,
    /// The hub closed our queue (shutdown or dropped as too slow).
    HubClosed,
}

/// Forward events until either side goes away, then deregister.
async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    let (id, mut rx) = state.engine.subscribe();
    let (mut sink, mut stream) = socket.split();
    debug!(subscriber = %id, "WebSocket client connected");

    let exit = loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else {
                    break Exit::HubClosed;
                };
                let json = match serde_json::to_string(event.as_ref()) {
                    Ok(j) => j,
                    Err(e) => {
                        warn!(subscriber = %id, "failed to serialize change event: {e}");
                        continue;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    debug!(subscriber = %id, "WebSocket send failed");
                    break Exit::Client;
                }
            }
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break Exit::Client,
                    Some(Ok(Message::Ping(data))) => {
                        if sink.send(Message::Pong(data)).await.is_err() {
                            break Exit::Client;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(subscriber = %id, "WebSocket error: {e}");
                        break Exit::Client;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    };

    if exit == Exit::HubClosed {
        let frame = CloseFrame {
            code: close_code::AWAY,
            reason: "stream closed".into(),
        };
        // Best effort: the client may already be gone.
        let _ = sink.send(Message::Close(Some(frame))).await;
    }
    state.engine.unsubscribe(id);
    debug!(subscriber = %id, ?exit, "WebSocket client disconnected");
}
