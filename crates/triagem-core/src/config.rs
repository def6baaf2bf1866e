//! Configuration loaded from the process environment.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_INDEX_PAGE: &str = "templates/index.html";
pub const DEFAULT_MODEL_DIR: &str = "models/zero-shot";

/// Which classifier answers `/process`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Static keyword rules, no external dependency.
    #[default]
    Keywords,
    /// External LLM completion returning a JSON object.
    Llm,
    /// Zero-shot NLI model behind a keyword override.
    ZeroShot,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keywords => write!(f, "keywords"),
            Self::Llm => write!(f, "llm"),
            Self::ZeroShot => write!(f, "zero-shot"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "keywords" | "keyword" | "rules" => Ok(Self::Keywords),
            "llm" | "api" | "openai" => Ok(Self::Llm),
            "zero-shot" | "zero_shot" | "zeroshot" => Ok(Self::ZeroShot),
            other => Err(Error::Config(format!(
                "unknown classification strategy '{}' (expected keywords, llm or zero-shot)",
                other
            ))),
        }
    }
}

/// Top-level Triagem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriagemConfig {
    /// HTTP server port.
    pub port: u16,
    /// Active classification strategy.
    pub strategy: Strategy,
    /// Keep the original case when normalizing input text.
    pub case_sensitive: bool,
    /// Request body cap for `/process`.
    pub max_upload_bytes: usize,
    /// HTML page served at `/`.
    pub index_page: PathBuf,
    /// Directory holding the zero-shot ONNX model.
    pub model_dir: PathBuf,
}

impl Default for TriagemConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            strategy: Strategy::default(),
            case_sensitive: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            index_page: PathBuf::from(DEFAULT_INDEX_PAGE),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
        }
    }
}

impl TriagemConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT '{}'", p)))?,
            None => defaults.port,
        };

        let strategy = match lookup("TRIAGEM_STRATEGY") {
            Some(s) => s.parse()?,
            None => defaults.strategy,
        };

        let case_sensitive = lookup("TRIAGEM_CASE_SENSITIVE")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.case_sensitive);

        let max_upload_bytes = lookup("TRIAGEM_MAX_UPLOAD_BYTES")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.max_upload_bytes);

        let index_page = lookup("TRIAGEM_INDEX_PAGE")
            .map(PathBuf::from)
            .unwrap_or(defaults.index_page);

        let model_dir = lookup("TRIAGEM_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_dir);

        Ok(Self {
            port,
            strategy,
            case_sensitive,
            max_upload_bytes,
            index_page,
            model_dir,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
