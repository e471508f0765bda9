use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvoPulseError {
    #[error("Batch contained no valid records after normalization ({dropped} dropped)")]
    EmptyBatch { dropped: usize },

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, ConvoPulseError>;
