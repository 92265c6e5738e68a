// src/infra/errors.rs — Error types for ChicLens

use thiserror::Error;

use crate::core::session::SessionState;

#[derive(Error, Debug)]
pub enum ChicLensError {
    // Remote service errors (folded into AnalysisFailed / SynthesisFailed by the clients)
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Image synthesis failed: {0}")]
    SynthesisFailed(String),

    // Workflow errors
    #[error("Cannot {event} while session is {from}")]
    InvalidTransition {
        from: SessionState,
        event: &'static str,
    },

    #[error("No generated image to download")]
    NoImage,

    // User errors
    #[error("No API key configured. Set GEMINI_API_KEY or add `api_key` under [provider] in config.toml.")]
    NoCredentials,

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChicLensError {
    pub fn analysis_failed(error: impl std::fmt::Display) -> Self {
        ChicLensError::AnalysisFailed(error.to_string())
    }

    pub fn synthesis_failed(error: impl std::fmt::Display) -> Self {
        ChicLensError::SynthesisFailed(error.to_string())
    }
}
