//! Turns a transport's three-slot completion into one outcome.
//!
//! The checks run in a fixed order and the first match wins: transport
//! error, missing body, unrecognised metadata, status outside 200..=299,
//! success. A transport error therefore masks anything else the transport
//! reported, and a non-2xx status still carries the real body.

use bytes::Bytes;
use tracing::debug;

use crate::error::{FetchError, TransportError};
use crate::response::{HttpPayload, UrlResponse};

pub fn classify(
    data: Option<Bytes>,
    response: Option<UrlResponse>,
    error: Option<TransportError>,
) -> Result<HttpPayload, FetchError> {
    if let Some(error) = error {
        return Err(FetchError::Transport(error));
    }
    let Some(data) = data else {
        return Err(FetchError::EmptyData);
    };
    let Some(response) = response.and_then(UrlResponse::into_http) else {
        return Err(FetchError::UnknownResponse);
    };

    let payload = HttpPayload { data, response };
    if payload.response.is_success() {
        Ok(payload)
    } else {
        Err(FetchError::WrongStatusCode(payload))
    }
}

/// `classify`, with the outcome logged.
pub(crate) fn classify_logged(
    data: Option<Bytes>,
    response: Option<UrlResponse>,
    error: Option<TransportError>,
) -> Result<HttpPayload, FetchError> {
    let outcome = classify(data, response, error);
    match &outcome {
        Ok(payload) => debug!(
            status = payload.status(),
            url = %payload.response.url,
            bytes = payload.data.len(),
            "fetch succeeded"
        ),
        Err(FetchError::WrongStatusCode(payload)) => debug!(
            status = payload.status(),
            url = %payload.response.url,
            "fetch returned unsuccessful status"
        ),
        Err(err) => debug!(kind = err.kind(), error = %err, "fetch failed"),
    }
    outcome
}
