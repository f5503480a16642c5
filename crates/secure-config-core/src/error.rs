use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to fetch {context}: {status}")]
    HttpStatus { context: String, status: String },

    #[error("No API key found in config response")]
    MissingKey,

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
