//! External LLM access for classification.
//!
//! Sends a single non-streaming completion request and returns the JSON
//! object the model produced. LLM calls go to external APIs, no local
//! model required.

pub mod config;
pub mod providers;
pub mod types;

pub use config::{LLMConfig, ResolvedProvider};
pub use providers::complete_json;
pub use types::*;
