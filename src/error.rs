use url::Url;

use crate::session::SessionId;

/// Errors that can occur while controlling a playback session
#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    /// No player is tracked for the given session
    #[error("Session {0:?} not found")]
    SessionNotFound(SessionId),

    /// HTTP transport error while talking to the server
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected a remote-control command
    #[error("Remote command rejected with status {status}: {message}")]
    CommandRejected {
        /// HTTP status code returned by the server
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The configured server URL could not be parsed
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured server URL cannot serve as an API base
    #[error("Server URL {0} cannot serve as an API base")]
    UnusableBaseUrl(Url),

    /// A browse-media builder failed to produce a response
    #[error("Browse failed: {0}")]
    BrowseFailed(String),
}
