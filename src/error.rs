use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("api error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("api error ({status}): failed to read response body: {source}")]
    ApiBody {
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("failed to resolve admin key: {0}")]
    AuthCommand(String),
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
}

impl UsageError {
    /// Status code of a non-2xx response, if this error came from one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Api { status, .. } | Self::ApiBody { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, UsageError>;
