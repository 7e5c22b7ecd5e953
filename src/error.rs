//! Error types for the catalog session and its client collaborators

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures reported by a streaming-service client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The client already holds a valid session
    #[error("already logged in")]
    AlreadyLoggedIn,

    /// The call needs a session the client does not have (anymore)
    #[error("not logged in")]
    NotLoggedIn,

    /// The service rejected the login
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The service answered but the call itself failed
    #[error("call {call} failed: {message}")]
    CallFailure { call: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClientError {
    pub fn call_failure(call: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CallFailure {
            call: call.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by [`crate::CatalogSession`]
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A grouping key is missing from the requested index
    #[error("no {kind} named {name:?} in the library")]
    UnknownKey { kind: &'static str, name: String },

    /// No cached song carries the id
    #[error("song {0} not found in the library")]
    SongNotFound(String),

    /// Streaming needs a registered phone or iOS device
    #[error("no registered device to stream song with id: {0}")]
    NoDevice(String),

    #[error("Could not play song with id: {id}")]
    StreamUrl {
        id: String,
        #[source]
        source: ClientError,
    },
}
