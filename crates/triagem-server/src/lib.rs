//! Triagem server — email triage over HTTP.

pub mod pipeline;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
