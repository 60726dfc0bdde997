// src/errors.rs

use thiserror::Error;

pub type FynoraqResult<T> = Result<T, FynoraqError>;

#[derive(Debug, Error)]
pub enum FynoraqError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("relay error: {0}")]
    Relay(String),

    #[error("export error: {0}")]
    Export(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FynoraqError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        FynoraqError::Config(msg.into())
    }

    pub fn relay_error(msg: impl Into<String>) -> Self {
        FynoraqError::Relay(msg.into())
    }

    pub fn export_error(msg: impl Into<String>) -> Self {
        FynoraqError::Export(msg.into())
    }
}
