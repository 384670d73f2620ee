//! The request wrapper: one fixed request, one transport, any number of
//! fetches.
//!
//! # Design
//! `UrlRequest` holds an immutable `HttpRequest` and a shared handle to a
//! `Transport`. It owns no mutable state, so a single value can issue
//! concurrent fetches from several threads. Each fetch creates a task,
//! resumes it before returning, and hands the classified outcome to the
//! caller's completion on whichever thread the transport finishes on.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::classify::classify_logged;
use crate::decode::{self, Decoder, JsonOptions};
use crate::error::FetchError;
use crate::http::HttpRequest;
use crate::response::{DecodedResponse, HttpPayload, JsonResponse};
use crate::transport::{shared_transport, DataTask, Transport};

/// An HTTP request bound to the transport that will carry it.
#[derive(Clone)]
pub struct UrlRequest {
    request: HttpRequest,
    transport: Arc<dyn Transport>,
}

impl UrlRequest {
    /// Wrap `request`, using the shared transport.
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            transport: shared_transport(),
        }
    }

    /// Wrap a `GET` for `url`, using the shared transport.
    pub fn from_url(url: Url) -> Self {
        Self::new(HttpRequest::get(url))
    }

    /// Parse `path` into a URL and wrap a `GET` for it.
    ///
    /// Surrounding whitespace is ignored. Fails with `EmptyPath` when
    /// nothing is left and with `InvalidPath` when the rest is not a URL.
    pub fn from_path(path: &str) -> Result<Self, FetchError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(FetchError::EmptyPath);
        }
        let url = Url::parse(path).map_err(|_| FetchError::InvalidPath(path.to_string()))?;
        Ok(Self::from_url(url))
    }

    /// Same as `from_path`.
    pub fn create(path: &str) -> Result<Self, FetchError> {
        Self::from_path(path)
    }

    /// Replace the transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Start the request and report the classified outcome to `completion`.
    ///
    /// The task is resumed before this returns; the returned handle can be
    /// used to cancel it. `completion` runs exactly once for every outcome
    /// the transport reports.
    pub fn fetch<F>(&self, completion: F) -> Box<dyn DataTask>
    where
        F: FnOnce(Result<HttpPayload, FetchError>) + Send + 'static,
    {
        debug!(method = %self.request.method, url = %self.request.url, "starting fetch");
        let task = self.transport.data_task(
            &self.request,
            Box::new(move |data, response, error| {
                completion(classify_logged(data, response, error));
            }),
        );
        task.resume();
        task
    }

    /// `fetch`, then parse the body as generic JSON.
    pub fn fetch_json<F>(&self, options: JsonOptions, completion: F) -> Box<dyn DataTask>
    where
        F: FnOnce(Result<JsonResponse, FetchError>) + Send + 'static,
    {
        self.fetch(move |outcome| {
            completion(outcome.and_then(|payload| {
                let json = decode::json(&payload.data, options)
                    .map_err(|err| FetchError::Decode(Box::new(err)))?;
                Ok(JsonResponse {
                    json,
                    response: payload.response,
                })
            }));
        })
    }

    /// `fetch`, then decode the body into `T` with `decoder`.
    pub fn fetch_decoding<T, D, F>(&self, decoder: D, completion: F) -> Box<dyn DataTask>
    where
        T: DeserializeOwned + 'static,
        D: Decoder + Send + 'static,
        F: FnOnce(Result<DecodedResponse<T>, FetchError>) + Send + 'static,
    {
        self.fetch(move |outcome| {
            completion(outcome.and_then(|payload| {
                let value = payload
                    .decode_with::<T, D>(&decoder)
                    .map_err(|err| FetchError::Decode(Box::new(err)))?;
                Ok(DecodedResponse {
                    value,
                    response: payload.response,
                })
            }));
        })
    }
}

impl fmt::Debug for UrlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlRequest")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

impl From<HttpRequest> for UrlRequest {
    fn from(request: HttpRequest) -> Self {
        UrlRequest::new(request)
    }
}

impl From<Url> for UrlRequest {
    fn from(url: Url) -> Self {
        UrlRequest::from_url(url)
    }
}

impl FromStr for UrlRequest {
    type Err = FetchError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        UrlRequest::from_path(path)
    }
}

impl TryFrom<&str> for UrlRequest {
    type Error = FetchError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        UrlRequest::from_path(path)
    }
}
