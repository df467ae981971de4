use crate::mcp::errors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolsheetError {
    #[error("File {0} not found")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("input exceeds limit: {len} bytes (max {max})")]
    TooLarge { len: u64, max: u64 },

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("{format} parse failed: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("failed to serialize tools: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

impl ToolsheetError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn parse(format: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => errors::NOT_FOUND,
            Self::InvalidInput(_) => errors::INVALID_INPUT,
            Self::TooLarge { .. } => errors::TOO_LARGE,
            Self::UnsupportedFormat(_) => errors::UNSUPPORTED_FORMAT,
            Self::Parse { .. } => errors::PARSE_FAILED,
            Self::Serialize(_) | Self::Write(_) => errors::INTERNAL_ERROR,
        }
    }
}
