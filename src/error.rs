// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Network(NetworkError),
    Snapshot(String),
}

/// Specific error types for fetching remote resources.
/// Used to keep the cause of a failed download inspectable without
/// parsing message strings.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// The URL could not be parsed or uses an unsupported scheme
    InvalidUrl(String),

    /// The server answered with a non-success status code
    Status(u16),

    /// The request did not complete in time
    Timeout,

    /// Connection could not be established or was reset
    Connection(String),

    /// The response body was empty
    EmptyBody,
}

impl NetworkError {
    /// Returns true when retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            NetworkError::Timeout | NetworkError::Connection(_) => true,
            NetworkError::Status(code) => *code == 429 || *code >= 500,
            NetworkError::InvalidUrl(_) | NetworkError::EmptyBody => false,
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            NetworkError::Status(code) => write!(f, "HTTP status: {}", code),
            NetworkError::Timeout => write!(f, "Request timed out"),
            NetworkError::Connection(msg) => write!(f, "Connection failed: {}", msg),
            NetworkError::EmptyBody => write!(f, "Empty response body"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Network(e) => write!(f, "Network Error: {}", e),
            Error::Snapshot(e) => write!(f, "Snapshot Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<NetworkError> for Error {
    fn from(err: NetworkError) -> Self {
        Error::Network(err)
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if let Some(status) = err.status() {
            NetworkError::Status(status.as_u16())
        } else if err.is_builder() {
            NetworkError::InvalidUrl(err.to_string())
        } else {
            NetworkError::Connection(err.to_string())
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(NetworkError::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Snapshot(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
