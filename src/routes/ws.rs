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

use crate::logic;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::session::SessionError;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "emhoctoan_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "emhoctoan_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_to_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "emhoctoan_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "emhoctoan_backend", "WebSocket disconnected");
}

/// Parse, dispatch, serialize.
async fn reply_to_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "emhoctoan_backend", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => {
      debug!(target: "emhoctoan_backend", raw = %trunc_for_log(txt, 200), "WS unparseable message");
      ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }
    }
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

fn session_error(e: SessionError) -> ServerWsMessage {
  ServerWsMessage::Error { message: e.to_string() }
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::StartTest { settings } => match logic::start_test(state, settings).await {
      Ok(session) => {
        info!(target: "session", problems = session.problems.len(), "WS start_test served");
        ServerWsMessage::Session { session }
      }
      Err(e) => session_error(e),
    },

    ClientWsMessage::SubmitAnswer { problem_id, answer } => {
      match logic::submit_answer(state, &problem_id, &answer).await {
        Ok(outcome) => {
          info!(target: "session", id = %problem_id, correct = outcome.correct, "WS submit_answer recorded");
          ServerWsMessage::AnswerResult { outcome }
        }
        Err(e) => session_error(e),
      }
    }

    ClientWsMessage::Navigate { index } => match logic::navigate(state, index).await {
      Ok(session) => ServerWsMessage::Session { session },
      Err(e) => session_error(e),
    },

    ClientWsMessage::Finish => match logic::finish(state).await {
      Ok(results) => ServerWsMessage::Results { results },
      Err(e) => session_error(e),
    },

    ClientWsMessage::Retake => match logic::retake(state).await {
      Ok(session) => ServerWsMessage::Session { session },
      Err(e) => session_error(e),
    },

    ClientWsMessage::GetSession => ServerWsMessage::Session { session: logic::current_session(state).await },

    ClientWsMessage::Reset => ServerWsMessage::Session { session: logic::reset(state).await },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{AppConfig, StorageConfig};
  use serde_json::Value;
  use tempfile::TempDir;

  fn state() -> (TempDir, AppState) {
    let dir = TempDir::new().unwrap();
    let cfg = AppConfig {
      storage: StorageConfig { data_dir: dir.path().to_string_lossy().into_owned() },
      ..AppConfig::default()
    };
    (dir, AppState::new(cfg))
  }

  async fn send(state: &AppState, msg: &str) -> Value {
    serde_json::from_str(&reply_to_text(msg, state).await).unwrap()
  }

  #[tokio::test]
  async fn ping_pong() {
    let (_dir, st) = state();
    assert_eq!(send(&st, r#"{"type":"ping"}"#).await["type"], "pong");
  }

  #[tokio::test]
  async fn garbage_gets_an_error_reply() {
    let (_dir, st) = state();
    let v = send(&st, "not json").await;
    assert_eq!(v["type"], "error");
    assert!(v["message"].as_str().unwrap().starts_with("Invalid JSON"));
  }

  #[tokio::test]
  async fn session_round_over_ws() {
    let (_dir, st) = state();
    let started = send(
      &st,
      r#"{"type":"start_test","settings":{"enabledTypes":["division_table"],"difficulty":"easy","questionQuantity":2}}"#,
    )
    .await;
    assert_eq!(started["type"], "session");
    assert_eq!(started["session"]["phase"], "testing");

    let first = &started["session"]["problems"][0];
    let msg = serde_json::json!({
      "type": "submit_answer",
      "problemId": first["id"],
      "answer": first["answer"],
    });
    let answered = send(&st, &msg.to_string()).await;
    assert_eq!(answered["type"], "answer_result");
    assert_eq!(answered["correct"], true);

    let again = send(&st, &msg.to_string()).await;
    assert_eq!(again["type"], "error");

    let results = send(&st, r#"{"type":"finish"}"#).await;
    assert_eq!(results["type"], "results");
    assert_eq!(results["results"]["totalMarks"], 2);
    assert_eq!(results["results"]["percentage"], 50);

    let reset = send(&st, r#"{"type":"reset"}"#).await;
    assert_eq!(reset["session"]["phase"], "setup");
  }
}
