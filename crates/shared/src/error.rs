//! Error types for loading configuration and fixtures

use thiserror::Error;

/// General SkillSwap I/O-side error type
#[derive(Debug, Error)]
pub enum SkillswapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Fixture error: {0}")]
    Fixture(String),
}

pub type Result<T> = std::result::Result<T, SkillswapError>;
