//! HTTP surface of the holocron film catalog.
//!
//! Exposes the sync engine (`/api/films/sync/*`) and catalog CRUD
//! (`/api/films`) over axum, with configuration loaded from `holocron.toml`
//! and `HOLOCRON__*` environment overrides.

pub mod config;
pub mod handlers;
pub mod observability;
pub mod server;
pub mod state;

pub use config::AppConfig;
pub use observability::init_tracing;
pub use server::{HolocronServer, ServerBuilder, build_app, build_router};
pub use state::AppState;
