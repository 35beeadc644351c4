//! HTTP transport shared by the worker clients.

use std::time::{Duration, Instant};

use futures::StreamExt;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RuntimeError, RuntimeResult};

/// Maximum error response body size kept for diagnostics (1 MB)
const MAX_ERROR_RESPONSE_SIZE: usize = 1024 * 1024;

/// Location and limits of one model worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Base URL without trailing path, e.g. `http://127.0.0.1:30000`.
    pub base_url: String,
    /// Model identifier sent to the worker and reported to clients.
    pub model_id: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    300
}

impl WorkerConfig {
    pub fn new(base_url: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model_id: model_id.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

pub(crate) enum ReadBodyResult {
    Ok(String),
    TooLarge,
    Error(String),
}

/// Read a response body, giving up once it exceeds `max_size` bytes.
pub(crate) async fn read_response_body_limited(
    response: reqwest::Response,
    max_size: usize,
) -> ReadBodyResult {
    let mut stream = response.bytes_stream();
    let mut buf: Vec<u8> = Vec::new();

    while let Some(chunk_result) = stream.next().await {
        match chunk_result {
            Ok(chunk) => {
                if buf.len() + chunk.len() > max_size {
                    return ReadBodyResult::TooLarge;
                }
                buf.extend_from_slice(&chunk);
            }
            Err(e) => return ReadBodyResult::Error(e.to_string()),
        }
    }

    // Decode once so multibyte sequences split across chunks survive
    match String::from_utf8(buf) {
        Ok(body) => ReadBodyResult::Ok(body),
        Err(e) => ReadBodyResult::Error(format!("invalid UTF-8 in response body: {}", e)),
    }
}

/// POST `body` as JSON and decode a JSON reply.
pub(crate) async fn post_json<B, R>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
    timeout: Duration,
) -> RuntimeResult<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let start = Instant::now();
    debug!(url = %url, "Sending request to worker");

    let response = client
        .post(url)
        .json(body)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| {
            warn!(url = %url, error = %e, "Request to worker failed");
            RuntimeError::from_send(url, e)
        })?;

    let status = response.status();
    debug!(url = %url, status = %status, "Received response from worker");

    if !status.is_success() {
        let body = match read_response_body_limited(response, MAX_ERROR_RESPONSE_SIZE).await {
            ReadBodyResult::Ok(b) if b.is_empty() => format!("Worker returned error: {}", status),
            ReadBodyResult::Ok(b) => b,
            ReadBodyResult::TooLarge => {
                format!("Worker returned error: {} (response too large)", status)
            }
            ReadBodyResult::Error(e) => {
                warn!(url = %url, error = %e, "Failed to read error response body");
                format!("Worker returned error: {}", status)
            }
        };
        warn!(
            url = %url,
            status = %status,
            body_preview = %body.chars().take(200).collect::<String>(),
            "Worker error"
        );
        return Err(RuntimeError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let parsed = response.json::<R>().await.map_err(|e| {
        warn!(url = %url, error = %e, "Failed to parse worker response");
        RuntimeError::InvalidResponse(e.to_string())
    })?;

    debug!(
        url = %url,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Worker request completed"
    );
    Ok(parsed)
}
