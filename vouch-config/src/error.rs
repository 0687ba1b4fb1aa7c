// Error types for rule configuration

use thiserror::Error;
use vouch_validation::ValidationError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load rules: {0}")]
    LoadError(String),

    #[error("Failed to parse rules: {0}")]
    ParseError(String),

    #[error("Unsupported rule file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid rule document: {0}")]
    InvalidDocument(String),

    #[error("Invalid rule for field '{field}': {source}")]
    InvalidRule {
        field: String,
        #[source]
        source: ValidationError,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
