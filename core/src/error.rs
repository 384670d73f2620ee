//! Error types for request construction, fetching and decoding.
//!
//! # Design
//! One closed enum covers every way a `UrlRequest` can fail. Path errors are
//! returned synchronously from the constructors; everything else reaches the
//! caller through the fetch completion. Transport and decoder errors are
//! carried unmodified so callers can downcast to the concrete type.

use std::error::Error as StdError;

use thiserror::Error;

use crate::decode::utf8_text;
use crate::response::HttpPayload;

/// Error reported by a transport for a failure below HTTP (DNS, TLS,
/// timeout, connection reset, cancellation).
pub type TransportError = Box<dyn StdError + Send + Sync + 'static>;

/// Error reported by a JSON parser or an injected `Decoder`.
pub type DecodeError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors produced by `UrlRequest`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The path string was empty after trimming whitespace.
    #[error("String path is empty")]
    EmptyPath,

    /// The trimmed path string is not a valid URL.
    #[error("Invalid path for URL: {0}")]
    InvalidPath(String),

    /// The transport failed before an HTTP response was available.
    #[error(transparent)]
    Transport(TransportError),

    /// The transport completed without any body bytes.
    #[error("There is no data in the server response")]
    EmptyData,

    /// The response metadata is not an HTTP response.
    #[error("Server response was not recognized")]
    UnknownResponse,

    /// The server answered outside 200..=299. The payload keeps the body so
    /// callers can inspect server-side error detail.
    #[error("Unsuccessful HTTP status code: {}. Error: {}", status_label(.0), body_text(.0))]
    WrongStatusCode(HttpPayload),

    /// The body could not be parsed or decoded.
    #[error(transparent)]
    Decode(DecodeError),
}

impl FetchError {
    /// The payload of a `WrongStatusCode` failure.
    pub fn payload(&self) -> Option<&HttpPayload> {
        match self {
            FetchError::WrongStatusCode(payload) => Some(payload),
            _ => None,
        }
    }

    /// Short name of the variant, used in log fields.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            FetchError::EmptyPath => "empty_path",
            FetchError::InvalidPath(_) => "invalid_path",
            FetchError::Transport(_) => "transport",
            FetchError::EmptyData => "empty_data",
            FetchError::UnknownResponse => "unknown_response",
            FetchError::WrongStatusCode(_) => "wrong_status_code",
            FetchError::Decode(_) => "decode",
        }
    }
}

fn body_text(payload: &HttpPayload) -> String {
    utf8_text(&payload.data)
}

fn status_label(payload: &HttpPayload) -> String {
    match payload.response.status_code() {
        Some(code) if code.canonical_reason().is_some() => code.to_string(),
        _ => payload.response.status.to_string(),
    }
}
