//! WebSocket binding for persistent chat sessions at `GET /api/chat/ws`.
//!
//! One cycle in flight per session: the reply to frame N is written before
//! frame N+1 is read. A read or write failure ends this session only.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use tracing::Instrument;

use super::wire::{decode_query, ChatResponse, SESSION_STRATEGIES};
use crate::app::AppState;
use crate::gateway::GatewayResult;

static SESSIONS: AtomicU64 = AtomicU64::new(0);

/// Axum handler for `GET /api/chat/ws`
pub async fn handle_ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    tracing::debug!("WebSocket connection attempt...");
    ws.on_upgrade(move |socket| {
        let id = SESSIONS.fetch_add(1, Ordering::Relaxed) + 1;
        run_session(socket, state).instrument(tracing::info_span!("session", id))
    })
}

async fn run_session(mut socket: WebSocket, state: AppState) {
    tracing::info!("WebSocket connection established");

    loop {
        let frame = match socket.recv().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                tracing::debug!("WebSocket read error: {}", e);
                break;
            }
            None => break,
        };

        let payload = match frame {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // axum answers pings itself
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => continue,
        };

        let result = match decode_query(payload.as_bytes(), SESSION_STRATEGIES) {
            Ok(query) => state.gateway.handle(query).await,
            Err(e) => {
                tracing::warn!("Error parsing message: {}", e);
                GatewayResult::failed(&e)
            }
        };

        if let Err(e) = socket.send(encode_reply(&result)).await {
            tracing::debug!("WebSocket write error: {}", e);
            break;
        }
    }

    tracing::info!("WebSocket connection closed");
}

/// Completed cycles go out as raw text, everything else as a `ChatResponse`
pub fn encode_reply(result: &GatewayResult) -> Message {
    if result.is_completed() {
        return Message::Text(result.text.clone());
    }

    match serde_json::to_string(&ChatResponse::from(result)) {
        Ok(json) => Message::Text(json),
        Err(e) => {
            tracing::error!("Error marshaling response: {}", e);
            Message::Text(result.text.clone())
        }
    }
}
