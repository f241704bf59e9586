//! WIPPF scoring backend.
//!
//! Turns Likert answers (1..=4) on the WIPPF question battery into per-category
//! sums and a two-triad macro profile, imports multi-person CSV sheets through the
//! same engine, and keeps a JSON-backed history of results behind an HTTP API.

pub mod category;
pub mod compare;
pub mod config;
pub mod domain;
pub mod error;
pub mod history;
pub mod import;
pub mod logic;
pub mod protocol;
pub mod routes;
pub mod scoring;
pub mod seeds;
pub mod state;
pub mod telemetry;

pub use routes::build_router;
pub use state::AppState;
