//! Triagem Core — configuration, error type, classification result.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Strategy, TriagemConfig};
pub use error::{Error, Result};
pub use types::{category, ClassificationResult};
