use thiserror::Error;

#[derive(Error, Debug)]
pub enum SudokuError {
    #[error("Malformed grid: {reason}")]
    MalformedGrid { reason: String },

    #[error("Solver request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Solver did not answer within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Solve was cancelled")]
    Cancelled,

    #[error("Solver responded with status {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing session key: {key}")]
    MissingKey { key: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl SudokuError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedGrid {
            reason: reason.into(),
        }
    }

    /// CLI 結束代碼
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::InvalidConfigValue { .. } => 1,
            Self::Network(_) | Self::Timeout { .. } | Self::ServiceStatus { .. } => 2,
            Self::MalformedGrid { .. }
            | Self::Serialization(_)
            | Self::Io(_)
            | Self::MissingKey { .. } => 3,
            Self::Cancelled => 130,
        }
    }
}

pub type Result<T> = std::result::Result<T, SudokuError>;
