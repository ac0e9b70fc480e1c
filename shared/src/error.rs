use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ItemKind;

pub const ALERT_TITLE: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Timeout,
    Server,
    Decoding,
    CacheEmpty,
    Storage,
    Corrupted,
    Unsupported,
    Contract,
    InvalidConfig,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Server => "SERVER_ERROR",
            Self::Decoding => "DESERIALIZATION_ERROR",
            Self::CacheEmpty => "CACHE_EMPTY",
            Self::Storage => "STORAGE_ERROR",
            Self::Corrupted => "CACHE_CORRUPTED",
            Self::Unsupported => "FEATURE_UNAVAILABLE",
            Self::Contract => "UNEXPECTED_ITEM",
            Self::InvalidConfig => "INVALID_CONFIG",
        }
    }

    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::Network => {
                "Unable to connect. Please check your internet connection and try again."
            }
            Self::Timeout => "The request timed out. Please try again.",
            Self::Server => "Something went wrong on our side. Please try again later.",
            Self::Decoding | Self::Corrupted | Self::Contract => {
                "A data error occurred. Please contact support if this persists."
            }
            Self::CacheEmpty => "No saved data is available offline.",
            Self::Storage => "Unable to read data saved on this device.",
            Self::Unsupported => "Offline data is not available for this list.",
            Self::InvalidConfig => "This list could not be opened.",
        }
    }
}

/// Failure of a remote fetch. Every variant is retried the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("server responded with {status}: {message}")]
    Server { status: u16, message: String },

    #[error("could not decode response: {0}")]
    Decoding(String),
}

impl FetchError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Timeout => ErrorKind::Timeout,
            Self::Server { .. } => ErrorKind::Server,
            Self::Decoding(_) => ErrorKind::Decoding,
        }
    }

    /// Builds an error from a non-success HTTP response, preferring the
    /// `message` field of a JSON error body when there is one.
    #[must_use]
    pub fn from_http_status(status: u16, body: Option<&[u8]>) -> Self {
        if status == 408 || status == 504 {
            return Self::Timeout;
        }

        let message = body
            .and_then(|b| serde_json::from_slice::<ApiErrorResponse>(b).ok())
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error: {status}"));

        Self::Server { status, message }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CacheError {
    #[error("no cached data")]
    Empty,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("corrupted cache: {reason}")]
    Corrupted { reason: String },

    #[error("cache schema version {found} is newer than supported {max}")]
    FutureSchema { found: u32, max: u32 },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("no cached data is kept for {0}")]
    Unsupported(ItemKind),
}

impl CacheError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty => ErrorKind::CacheEmpty,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Corrupted { .. } | Self::FutureSchema { .. } | Self::Serialization(_) => {
                ErrorKind::Corrupted
            }
            Self::Unsupported(_) => ErrorKind::Unsupported,
        }
    }
}

impl From<ciborium::de::Error<std::io::Error>> for CacheError {
    fn from(e: ciborium::de::Error<std::io::Error>) -> Self {
        CacheError::Serialization(e.to_string())
    }
}

impl From<ciborium::ser::Error<std::io::Error>> for CacheError {
    fn from(e: ciborium::ser::Error<std::io::Error>) -> Self {
        CacheError::Serialization(e.to_string())
    }
}

/// A terminal failure of a refresh cycle. The view shows it as an alert.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ListError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

impl ListError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(e) => e.kind(),
            Self::Cache(e) => e.kind(),
            Self::Contract(_) => ErrorKind::Contract,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        self.kind().user_message().to_string()
    }
}

/// Alert the view carries after a terminal failure, until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorAlert {
    pub title: String,
    pub message: String,
    pub error_code: String,
}

impl From<ErrorKind> for ErrorAlert {
    fn from(kind: ErrorKind) -> Self {
        Self {
            title: ALERT_TITLE.to_string(),
            message: kind.user_message().to_string(),
            error_code: kind.code().to_string(),
        }
    }
}

impl From<&ListError> for ErrorAlert {
    fn from(e: &ListError) -> Self {
        Self::from(e.kind())
    }
}

/// The shell broke its contract: it returned an item the screen does not
/// list. Halts the refresh cycle without publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("expected {expected} items, source returned a {found} item")]
pub struct ContractViolation {
    pub expected: ItemKind,
    pub found: ItemKind,
}
