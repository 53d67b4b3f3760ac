use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::shortlist::{CandidateLoadError, PersistError};
use std::fmt;

/// Process exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_LOAD_FAILURE: i32 = 1;
pub const EXIT_WRITE_FAILURE: i32 = 2;
pub const EXIT_INVALID_INPUT: i32 = 3;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Input(InputError),
    Load(CandidateLoadError),
    Persist(PersistError),
    Render(serde_json::Error),
    Console(std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Load(_) => EXIT_LOAD_FAILURE,
            AppError::Persist(_) | AppError::Render(_) | AppError::Console(_) => {
                EXIT_WRITE_FAILURE
            }
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Input(_) => {
                EXIT_INVALID_INPUT
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Input(err) => write!(f, "invalid input: {}", err),
            AppError::Load(err) => write!(f, "load error: {}", err),
            AppError::Persist(err) => write!(f, "write error: {}", err),
            AppError::Render(err) => write!(f, "could not render summary: {}", err),
            AppError::Console(err) => write!(f, "console output failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Load(err) => Some(err),
            AppError::Persist(err) => Some(err),
            AppError::Render(err) => Some(err),
            AppError::Console(err) => Some(err),
        }
    }
}

/// Problems with operator-supplied input: flags or the quota prompts.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{0}")]
    Usage(String),
    #[error("failed to read quota from stdin: {0}")]
    Stdin(#[from] std::io::Error),
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<InputError> for AppError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<CandidateLoadError> for AppError {
    fn from(value: CandidateLoadError) -> Self {
        Self::Load(value)
    }
}

impl From<PersistError> for AppError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Console(value)
    }
}
