use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error kind that represents failures reported by the [`crate::Client`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ErrorKind {
    /// Initialization of the internal [`reqwest::Client`] failed.
    HttpClientInitFailure = 1,
    /// The evaluated toggle was not found in the current snapshot, the caller-supplied default was returned.
    ToggleNotFound = 10,
    /// A strategy binding referenced a name with no registered strategy; the binding contributed "not enabled".
    UnknownStrategy = 11,
    /// Invalid HTTP response was received (unexpected HTTP status code).
    UnexpectedHttpResponse = 20,
    /// The HTTP request timed out.
    HttpRequestTimeout = 21,
    /// The HTTP request failed (most likely, due to a local network issue).
    HttpRequestFailure = 22,
    /// An invalid HTTP response was received (200 OK with an invalid content).
    InvalidResponseContent = 23,
    /// No backup store is configured, or the configured store had no data to fall back to.
    BackupUnavailable = 30,
    /// The backup store returned content that could not be decoded as a toggle payload.
    InvalidBackupContent = 31,
    /// The configured toggle source URL is empty or not a valid URL.
    InvalidSourceUrl = 40,
    /// A configured HTTP header has an invalid name or value.
    InvalidHeader = 41,
}

impl ErrorKind {
    pub(crate) fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Error struct that holds the [`ErrorKind`] and message of the reported failure.
#[derive(Debug, PartialEq)]
pub struct ClientError {
    /// Error kind that represents failures reported by the [`crate::Client`].
    pub kind: ErrorKind,
    /// The text representation of the failure.
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: ErrorKind, message: String) -> Self {
        Self { message, kind }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl Error for ClientError {}
