//! Transport capability and its default ureq implementation.
//!
//! # Design
//! A `Transport` turns a request into a `DataTask` that, once resumed,
//! performs the exchange somewhere else and calls its completion exactly
//! once with three optional slots: body bytes, response metadata and a
//! transport error. The wrapper never blocks on a task and never retries.
//!
//! `UreqTransport` runs each resumed task on its own worker thread with a
//! blocking ureq agent. Status-as-error is disabled so non-2xx responses
//! arrive as data and the classifier decides what they mean.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::{trace, warn};
use ureq::{Agent, ResponseExt};
use url::Url;

use crate::error::TransportError;
use crate::http::HttpRequest;
use crate::response::{HttpResponse, UrlResponse};

/// Callback a transport invokes once a task finishes.
pub type RawCompletion =
    Box<dyn FnOnce(Option<Bytes>, Option<UrlResponse>, Option<TransportError>) + Send + 'static>;

/// Performs network exchanges on behalf of a `UrlRequest`.
///
/// Implementations must be safe to share between threads; one transport
/// usually serves many requests concurrently.
pub trait Transport: Send + Sync {
    /// Create a suspended task for `request`. Nothing is sent until the
    /// task is resumed.
    fn data_task(&self, request: &HttpRequest, completion: RawCompletion) -> Box<dyn DataTask>;
}

/// Handle to one in-flight exchange.
pub trait DataTask: Send + Sync {
    /// Start the exchange. Calling it again has no effect.
    fn resume(&self);

    /// Abandon the exchange. What the completion observes afterwards is up
    /// to the transport.
    fn cancel(&self);
}

/// Reported by `UreqTransport` when a task is cancelled before it
/// completes.
#[derive(Debug, Error)]
#[error("the data task was cancelled")]
pub struct Cancelled;

/// Settings for `UreqTransport`.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Upper bound for a whole exchange, including reading the body.
    pub timeout: Option<Duration>,
    /// Largest body accepted, in bytes. `None` reads bodies of any size.
    pub body_limit: Option<u64>,
}

/// Blocking ureq agent driven from worker threads.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    body_limit: u64,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("body_limit", &self.body_limit)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(config: TransportConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self {
            agent,
            body_limit: config.body_limit.unwrap_or(u64::MAX),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Transport for UreqTransport {
    fn data_task(&self, request: &HttpRequest, completion: RawCompletion) -> Box<dyn DataTask> {
        Box::new(UreqTask {
            agent: self.agent.clone(),
            body_limit: self.body_limit,
            request: request.clone(),
            state: Arc::new(TaskState {
                completion: Mutex::new(Some(completion)),
                started: AtomicBool::new(false),
            }),
        })
    }
}

static SHARED: LazyLock<Arc<dyn Transport>> =
    LazyLock::new(|| Arc::new(UreqTransport::default()));

/// The process-wide transport used when none is supplied.
pub fn shared_transport() -> Arc<dyn Transport> {
    Arc::clone(&SHARED)
}

struct UreqTask {
    agent: Agent,
    body_limit: u64,
    request: HttpRequest,
    state: Arc<TaskState>,
}

struct TaskState {
    completion: Mutex<Option<RawCompletion>>,
    started: AtomicBool,
}

impl TaskState {
    /// Deliver to the completion unless something already has.
    fn finish(
        &self,
        data: Option<Bytes>,
        response: Option<UrlResponse>,
        error: Option<TransportError>,
    ) -> bool {
        let completion = self
            .completion
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match completion {
            Some(completion) => {
                completion(data, response, error);
                true
            }
            None => false,
        }
    }
}

impl DataTask for UreqTask {
    fn resume(&self) {
        if self.state.started.swap(true, Ordering::AcqRel) {
            return;
        }

        let agent = self.agent.clone();
        let body_limit = self.body_limit;
        let request = self.request.clone();
        let state = Arc::clone(&self.state);
        let spawned = thread::Builder::new()
            .name("fetch-transfer".to_string())
            .spawn(move || {
                trace!(method = %request.method, url = %request.url, "transfer started");
                let delivered = match perform(&agent, &request, body_limit) {
                    Ok((data, response)) => state.finish(Some(data), Some(response), None),
                    Err(err) => state.finish(None, None, Some(err)),
                };
                if !delivered {
                    trace!(url = %request.url, "transfer finished after cancellation, result dropped");
                }
            });

        if let Err(err) = spawned {
            self.state.finish(None, None, Some(Box::new(err)));
        }
    }

    fn cancel(&self) {
        if self.state.finish(None, None, Some(Box::new(Cancelled))) {
            warn!(method = %self.request.method, url = %self.request.url, "data task cancelled");
        }
    }
}

/// Run one exchange to completion on the current thread.
fn perform(
    agent: &Agent,
    request: &HttpRequest,
    body_limit: u64,
) -> Result<(Bytes, UrlResponse), TransportError> {
    let mut builder = http::Request::builder()
        .method(request.method.as_str())
        .uri(request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let mut response = match &request.body {
        Some(body) => agent.run(builder.body(body.to_vec())?)?,
        None => agent.run(builder.body(())?)?,
    };

    let url = Url::parse(&response.get_uri().to_string()).unwrap_or_else(|_| request.url.clone());
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let metadata = HttpResponse {
        url,
        status: response.status().as_u16(),
        headers,
    };
    let data = response
        .body_mut()
        .with_config()
        .limit(body_limit)
        .read_to_vec()?;

    Ok((Bytes::from(data), UrlResponse::Http(metadata)))
}
