use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Missing page hook: {0}")]
    MissingHook(String),

    #[error("No handler bound to node {0}")]
    Unbound(usize),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Message the backend sends once an anonymous session has used up its
/// free requests.
pub const AUTH_REQUIRED: &str = "Please login before making additional requests.";

/// A well-formed `{ "error": ... }` body from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationError {
    pub message: String,
}

impl ApplicationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn is_auth(&self) -> bool {
        self.message == AUTH_REQUIRED
    }
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Why a scoring request did not produce a payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Failure {
    /// The request never produced a decodable body.
    #[error("Could not reach the server: {0}")]
    Transport(String),

    #[error("{0}")]
    Application(ApplicationError),
}

impl Failure {
    pub fn application(message: impl Into<String>) -> Self {
        Failure::Application(ApplicationError::new(message))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Failure::Application(e) if e.is_auth())
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        Failure::Transport(err.to_string())
    }
}

pub type ScoreResult<T> = std::result::Result<T, Failure>;
