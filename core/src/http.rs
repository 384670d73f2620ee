//! Request descriptor types.
//!
//! # Design
//! A request is plain data: method, URL, headers and an optional body. It is
//! fixed when a `UrlRequest` is constructed and handed to the transport
//! unchanged on every fetch.

use std::fmt;

use bytes::Bytes;
use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Immutable once wrapped in a `UrlRequest`; the builder-style methods
/// consume and return `self` so a descriptor can be assembled inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// The default descriptor for a URL: `GET`, no headers, no body.
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl From<Url> for HttpRequest {
    fn from(url: Url) -> Self {
        HttpRequest::get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://example.com/").unwrap()
    }

    #[test]
    fn get_produces_bare_request() {
        let req = HttpRequest::get(url());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url.as_str(), "http://example.com/");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn builder_methods_accumulate() {
        let req = HttpRequest::get(url())
            .with_method(HttpMethod::Post)
            .with_header("content-type", "application/json")
            .with_header("accept", "application/json")
            .with_body(r#"{"name":"Bob"}"#);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.headers[0].0, "content-type");
        assert_eq!(req.body.as_deref(), Some(&br#"{"name":"Bob"}"#[..]));
    }

    #[test]
    fn from_url_matches_get() {
        assert_eq!(HttpRequest::from(url()), HttpRequest::get(url()));
    }

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }
}
