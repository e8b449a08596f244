//! platescan gateway HTTP API server
//!
//! Serves `POST /api/detect-plate` and `GET /api/health`, and keeps the
//! denylist fresh while running.

pub mod denylist_reload;
pub mod detect;
pub mod error;
pub mod health_api;
pub mod payload;
pub mod server;

pub use denylist_reload::{DenylistReloader, SharedDenylist, load_denylist, reload_denylist};
pub use error::ApiError;
pub use server::{GatewayState, build_router, start_server};
