use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid filter JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid filter config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON parsed but is not a filter document (e.g. a top-level array).
    #[error("invalid filter document: {message}")]
    InvalidDocument { message: String },

    /// A saved-filter user option whose value could not be read.
    #[error("invalid saved filter option '{key}': {message}")]
    InvalidUserOption { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, FilterError>;
