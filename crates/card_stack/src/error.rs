use std::path::PathBuf;

use shared::error::{EngineErrorReport, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("card at index {requested} cannot become interactive while index {active} is active")]
    MultipleActive { active: usize, requested: usize },
    #[error("only the top card may be interactive, got index {index}")]
    NotTopCard { index: usize },
    #[error("index {index} out of range for a stack of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
    #[error("failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid round setup: {0}")]
    InvalidRound(String),
}

impl EngineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::MultipleActive { .. } | EngineError::NotTopCard { .. } => {
                ErrorCode::InvariantViolation
            }
            EngineError::IndexOutOfRange { .. } => ErrorCode::NotFound,
            EngineError::InvalidConfig(_)
            | EngineError::ConfigRead { .. }
            | EngineError::ConfigParse(_) => ErrorCode::InvalidConfig,
            EngineError::InvalidRound(_) => ErrorCode::InvalidRound,
        }
    }

    pub fn report(&self) -> EngineErrorReport {
        EngineErrorReport::new(self.code(), self.to_string())
    }
}
