//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::error::QuestionError;
use crate::logic::request_question;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "repaso_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "repaso_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = serde_json::to_string(&reply_to_text(&txt, &state)).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "code": "INTERNAL", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "repaso_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "repaso_backend", "WebSocket disconnected");
}

/// Parse one text frame and produce the reply; malformed input becomes an error message.
fn reply_to_text(txt: &str, state: &AppState) -> ServerWsMessage {
  match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "repaso_backend", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state)
    }
    Err(e) => {
      let err = QuestionError::BadRequest(format!("invalid JSON: {}", e));
      ServerWsMessage::Error { code: err.code().into(), message: err.to_string() }
    }
  }
}

fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::NewQuestion { category, direction, seed } => {
      match request_question(state, category.as_deref(), direction.as_deref(), seed) {
        Ok(question) => ServerWsMessage::Question { question },
        Err(e) => ServerWsMessage::Error { code: e.code().into(), message: e.to_string() },
      }
    }
  }
}
