//! Decode helpers over already-received body bytes.
//!
//! # Design
//! Every helper borrows the bytes and does no I/O, so a payload can be
//! decoded any number of times. Text decoding is lossy and cannot fail. JSON
//! and typed decoding return the parser's own error type; the typed path goes
//! through a `Decoder` the caller may substitute.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use crate::response::HttpPayload;

/// Interpret `bytes` as UTF-8, replacing invalid sequences with U+FFFD.
pub fn utf8_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Options for reading generic JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Accept a top-level value that is neither an object nor an array.
    pub allow_fragments: bool,
}

impl JsonOptions {
    pub fn fragments_allowed() -> Self {
        Self {
            allow_fragments: true,
        }
    }
}

/// Parse `bytes` into a generic JSON value.
pub fn json(bytes: &[u8], options: JsonOptions) -> Result<Value, serde_json::Error> {
    let value: Value = serde_json::from_slice(bytes)?;
    if !options.allow_fragments && !(value.is_object() || value.is_array()) {
        return Err(serde_json::Error::custom(
            "top-level JSON value must be an object or an array",
        ));
    }
    Ok(value)
}

/// Turns body bytes into a typed value.
///
/// The default is `JsonDecoder`. Callers substitute their own to change the
/// wire format or to pre-process the document (unwrapping an envelope,
/// normalising dates) before deserialisation.
pub trait Decoder {
    type Error: std::error::Error + Send + Sync + 'static;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error>;
}

/// Plain `serde_json` decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(bytes)
    }
}

impl HttpPayload {
    /// Body as lossy UTF-8 text.
    pub fn text(&self) -> String {
        utf8_text(&self.data)
    }

    /// Body as generic JSON, with default options.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        json(&self.data, JsonOptions::default())
    }

    pub fn json_with(&self, options: JsonOptions) -> Result<Value, serde_json::Error> {
        json(&self.data, options)
    }

    /// Body decoded into `T` with `JsonDecoder`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        JsonDecoder.decode(&self.data)
    }

    pub fn decode_with<T: DeserializeOwned, D: Decoder>(&self, decoder: &D) -> Result<T, D::Error> {
        decoder.decode(&self.data)
    }
}
