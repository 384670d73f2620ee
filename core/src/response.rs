//! Response metadata and payload types.

use bytes::Bytes;
use http::StatusCode;
use serde_json::Value;
use url::Url;

/// Metadata of a response recognised as HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Final URL after any redirects the transport followed.
    pub url: Url,
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl HttpResponse {
    pub fn new(url: Url, status: u16) -> Self {
        Self {
            url,
            status,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Status as an `http::StatusCode`, or `None` for values outside 100..=999.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response metadata as a transport reports it.
///
/// Transports that speak more than HTTP (file or data URLs, custom schemes)
/// report `Other`; only `Http` metadata can produce a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlResponse {
    Http(HttpResponse),
    Other {
        url: Option<Url>,
        mime_type: Option<String>,
    },
}

impl UrlResponse {
    pub fn into_http(self) -> Option<HttpResponse> {
        match self {
            UrlResponse::Http(response) => Some(response),
            UrlResponse::Other { .. } => None,
        }
    }
}

impl From<HttpResponse> for UrlResponse {
    fn from(response: HttpResponse) -> Self {
        UrlResponse::Http(response)
    }
}

/// Raw body bytes paired with the HTTP metadata they arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpPayload {
    pub data: Bytes,
    pub response: HttpResponse,
}

impl HttpPayload {
    pub fn new(data: impl Into<Bytes>, response: HttpResponse) -> Self {
        Self {
            data: data.into(),
            response,
        }
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }
}

/// A successful fetch whose body was parsed as generic JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub json: Value,
    pub response: HttpResponse,
}

/// A successful fetch whose body was decoded into `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedResponse<T> {
    pub value: T,
    pub response: HttpResponse,
}
