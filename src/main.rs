//! Em Học Toán · Grade-3 math practice backend
//!
//! - Problem generation engine (28 families + the semester-1 review mix)
//! - Axum HTTP + WebSocket API for one student's test sessions
//! - File-backed persistence of session, progress and settings
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   EMHOCTOAN_CONFIG_PATH : path to TOML config (engine caps, data dir, default settings)
//!   EMHOCTOAN_DATA_DIR    : overrides `storage.data_dir` (default "./data")
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod catalog;
mod directive;
mod generator;
mod scoring;
mod session;
mod storage;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Config, data directory and any unfinished session.
  let state = Arc::new(AppState::from_env());

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "emhoctoan_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
