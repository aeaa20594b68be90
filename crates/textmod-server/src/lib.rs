//! textmod Server
//!
//! HTTP service exposing text moderation (`POST /classify`) and a latency
//! benchmark over it (`POST /benchmark`).
//!
//! The classifier and the benchmark runner are built once at startup and
//! shared by every request through [`AppState`].

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use app::run_server;
pub use config::ServiceConfig;
pub use routes::create_router;
pub use state::AppState;
