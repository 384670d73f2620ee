//! Callback-based HTTP fetching over a pluggable transport.
//!
//! # Overview
//! A `UrlRequest` pairs a fixed `HttpRequest` with a `Transport`. Calling
//! `fetch` starts the exchange and later hands the completion a single
//! `Result`: an `HttpPayload` for a 2xx response with a body, or a
//! `FetchError` naming what went wrong. Payload bytes can then be read as
//! text, generic JSON or a typed value.
//!
//! # Design
//! - The transport does all I/O. The crate only builds requests, classifies
//!   the transport's three-slot completion and decodes bodies.
//! - Classification order is fixed: transport error, missing data,
//!   non-HTTP metadata, status outside 200..=299, success.
//! - A process-wide `UreqTransport` is used unless a request is given its
//!   own transport with `with_transport`, which is also how tests inject
//!   mocks.
//! - Decoding borrows the payload and never consumes it.

pub mod classify;
pub mod decode;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod result;
pub mod transport;

pub use classify::classify;
pub use decode::{json, utf8_text, Decoder, JsonDecoder, JsonOptions};
pub use error::{DecodeError, FetchError, TransportError};
pub use crate::http::{HttpMethod, HttpRequest};
pub use request::UrlRequest;
pub use response::{DecodedResponse, HttpPayload, HttpResponse, JsonResponse, UrlResponse};
pub use result::ResultExt;
pub use transport::{
    shared_transport, Cancelled, DataTask, RawCompletion, Transport, TransportConfig, UreqTransport,
};
