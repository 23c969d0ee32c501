//! WebSocket handler for real-time event streaming.
//!
//! The `/ws` endpoint upgrades an HTTP connection to a WebSocket. Once
//! connected, the handler:
//!
//! - **Registers with the hub:** `connect()` issues an opaque subscriber id
//!   and a private event channel; every hub broadcast arrives there and is
//!   forwarded to the client as a JSON text frame.
//! - **Confirms the connection:** the first frame the client sees is
//!   `{"type":"connection_established"}`.
//! - **Answers the client:** `{"type":"ping"}` gets `{"type":"pong"}`; any
//!   other text frame is echoed back as `{"type":"echo","message":...}`.
//!
//! Teardown always funnels through `hub.disconnect(id)`, whether the client
//! closed cleanly, the transport failed, or the hub pruned us first.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};

use station_core::hub::Subscription;

use crate::state::AppState;

/// Incoming command from a WebSocket client.
///
/// Anything that does not parse as a command is treated as plain text and
/// echoed, matching the hub's original wire protocol.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    /// Keep-alive ping. Server responds with `{"type":"pong"}`.
    Ping,
}

/// Upgrade an HTTP request to a WebSocket subscription. Mounted at `/ws`.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Core WebSocket connection handler.
///
/// Uses `tokio::select!` to multiplex between hub events and incoming
/// client frames, keeping both directions in a single task.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let Subscription { id, mut receiver } = state.hub.connect().await;

    let hello = serde_json::json!({
        "type": "connection_established",
        "subscriber": id.to_string(),
    });
    if ws_sender
        .send(Message::Text(hello.to_string().into()))
        .await
        .is_err()
    {
        state.hub.disconnect(id).await;
        return;
    }

    loop {
        tokio::select! {
            // --- Branch 1: Forward hub events to the client ---
            event = receiver.recv() => {
                match event {
                    Some(event) => match serde_json::to_string(&event) {
                        Ok(json) => {
                            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                                // Client disconnected
                                break;
                            }
                        }
                        Err(err) => {
                            tracing::warn!("Failed to serialize StationEvent: {err}");
                        }
                    },
                    // The hub dropped our sender (we were pruned as stale).
                    None => break,
                }
            }

            // --- Branch 2: Process frames from the client ---
            msg_result = ws_receiver.next() => {
                match msg_result {
                    Some(Ok(Message::Text(text))) => {
                        process_frame(&text, &mut ws_sender).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        // Client disconnected
                        break;
                    }
                    Some(Err(err)) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        break;
                    }
                    // Ignore binary, ping, pong protocol frames (handled by axum/tungstenite)
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.hub.disconnect(id).await;
    tracing::debug!(subscriber = %id, "WebSocket connection closed");
}

/// Answer a single text frame from the client.
async fn process_frame(
    text: &str,
    ws_sender: &mut (impl SinkExt<Message, Error = axum::Error> + Unpin),
) {
    match serde_json::from_str::<WsCommand>(text) {
        Ok(WsCommand::Ping) => {
            let pong = r#"{"type":"pong"}"#;
            if ws_sender.send(Message::Text(pong.into())).await.is_err() {
                tracing::debug!("Failed to send pong (client disconnecting)");
            }
        }
        Err(_) => {
            // Not a command: echo it back verbatim.
            let echo = serde_json::json!({ "type": "echo", "message": text });
            if ws_sender
                .send(Message::Text(echo.to_string().into()))
                .await
                .is_err()
            {
                tracing::debug!("Failed to send echo (client disconnecting)");
            }
        }
    }
}
