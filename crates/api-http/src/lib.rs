//! HTTP API Layer
//!
//! Exposes the analysis / evolution / validation pipelines and the memory
//! log as JSON routes for the dashboard.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use handler::AppState;
pub use server::{router, HttpServer, HttpServerConfig};
