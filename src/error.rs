use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContasError {
    /// Business error reported by the accounts API, carrying its message.
    #[error("{0}")]
    Provider(String),

    #[error("remote operation timed out after {seconds} seconds")]
    RemoteTimeout { seconds: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ContasError {
    /// Whether this error came from talking to the remote accounts API.
    ///
    /// Only these are shown to the user by the listing and mutation
    /// controllers; everything else is a local programming or setup error.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            ContasError::Provider(_)
                | ContasError::RemoteTimeout { .. }
                | ContasError::Http(_)
                | ContasError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ContasError>;
