use thiserror::Error;

/// Failure of a single fetch/derive operation.
///
/// Every variant carries a human-readable message so the presentation layer can show it
/// in place of the section that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The country name (or code) is not in the lookup table.
    #[error("country '{0}' not found")]
    NameResolution(String),
    /// Transport error or non-success HTTP status.
    #[error("error fetching data from API: {0}")]
    Network(String),
    /// Response did not have the expected JSON shape.
    #[error("unexpected response shape: {0}")]
    DataShape(String),
    /// Request parameters rejected before any network call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Local file could not be read.
    #[error("i/o error: {0}")]
    Io(String),
}

impl FetchError {
    /// Short, stable name of the error kind (used in logs and JSON output).
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::NameResolution(_) => "name_resolution",
            FetchError::Network(_) => "network",
            FetchError::DataShape(_) => "data_shape",
            FetchError::InvalidArgument(_) => "invalid_argument",
            FetchError::Io(_) => "io",
        }
    }

    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        FetchError::DataShape(msg.into())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
