//! Cinematch Server - HTTP API for movie genre prediction
//!
//! This crate serves the genre classifier and the movie chat assistant over a
//! small JSON API:
//!
//! - **Prediction**: synopsis in, comma-joined genre labels out
//! - **Chat**: single-turn questions about the product, answered by Gemini
//! - **Health**: liveness and readiness probes
//!
//! Model artifacts and the chat client are loaded once at startup. Either may
//! be missing; the server still starts and the affected endpoint answers with
//! a 500 until the process is restarted with a working setup.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with component status
//! - `POST /api/predict` - `{"text": "..."}` → `{"genre": "Action, Comedy"}`
//! - `POST /api/chat` - `{"message": "..."}` → `{"response": "..."}`
//!
//! Errors are returned as `{"error": "message"}`.
//!
//! # Configuration
//!
//! Read from `.env`, an optional `server.toml` (or any format the `config`
//! crate knows) and `CINEMATCH_SERVER__*` environment variables, e.g.
//! `CINEMATCH_SERVER__PORT=8080` or `CINEMATCH_SERVER__MODEL_DIR=/srv/models`.
//! The Gemini key comes from `CINEMATCH_SERVER__GEMINI_API_KEY` or plain
//! `GEMINI_API_KEY`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
