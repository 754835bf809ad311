/// Result reporting: tells the scoring backend which category a player landed in.
///
/// Reporting is fire-and-forget. The request runs on a detached task, failures are
/// logged and dropped, and the response is kept only for inspection. Nothing in the
/// summary flow waits on it or branches on it.
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::StatusCode;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::category::Category;
use crate::change::ChangeGuard;

#[derive(Clone, Debug)]
pub struct ScoringClientConfig {
    pub url: String,
    pub timeout: Duration,
    pub max_error_body_bytes: usize,
}

impl ScoringClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(10),
            max_error_body_bytes: 8 * 1024,
        }
    }

    /// Returns `None` when `SCORING_URL` is unset, which disables reporting.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SCORING_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())?;

        let mut config = Self::new(url);

        let timeout = std::env::var("SCORING_TIMEOUT_SECS").ok();
        if let Some(timeout) = parse_timeout_secs(timeout.as_deref()) {
            config.timeout = timeout;
        }

        if let Some(limit) = std::env::var("SCORING_MAX_ERROR_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        {
            config.max_error_body_bytes = limit;
        }

        Some(config)
    }
}

/// A zero timeout would fail every request, so it counts as unset.
fn parse_timeout_secs(raw: Option<&str>) -> Option<Duration> {
    raw?.trim()
        .parse::<u64>()
        .ok()
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("scoring service returned error: status={status} body={body}")]
    Upstream { status: StatusCode, body: String },
}

/// Payload sent to the scoring service: `{"score":"<label>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreUpdate {
    pub score: Category,
}

/// Whatever the scoring service answered. The shape is not part of the contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResponse(pub serde_json::Value);

/// Destination for score updates.
pub trait ScoreSink: Send + Sync {
    fn submit(&self, update: ScoreUpdate) -> BoxFuture<'static, Result<ScoreResponse, ReportError>>;
}

#[derive(Clone)]
pub struct ScoringClient {
    config: ScoringClientConfig,
    http: reqwest::Client,
}

impl ScoringClient {
    pub fn new(config: ScoringClientConfig) -> Result<Self, ReportError> {
        let http = reqwest::Client::builder()
            .user_agent("quiz-summary/score-reporter")
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ScoringClientConfig {
        &self.config
    }

    pub async fn update_player(&self, update: &ScoreUpdate) -> Result<ScoreResponse, ReportError> {
        let resp = self
            .http
            .post(&self.config.url)
            .timeout(self.config.timeout)
            .json(update)
            .send()
            .await?;
        Self::parse_json_response(resp, self.config.max_error_body_bytes).await
    }

    async fn parse_json_response(
        resp: reqwest::Response,
        max_error_body_bytes: usize,
    ) -> Result<ScoreResponse, ReportError> {
        let status = resp.status();
        if !status.is_success() {
            let body = read_limited_text(resp, max_error_body_bytes).await;
            return Err(ReportError::Upstream { status, body });
        }

        let bytes = resp.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ScoreResponse(serde_json::Value::Null));
        }
        Ok(ScoreResponse(serde_json::from_slice(&bytes)?))
    }
}

impl ScoreSink for ScoringClient {
    fn submit(&self, update: ScoreUpdate) -> BoxFuture<'static, Result<ScoreResponse, ReportError>> {
        let client = self.clone();
        async move { client.update_player(&update).await }.boxed()
    }
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read scoring error body");
            "<failed to read error body>".to_string()
        }
    }
}

/// Reports the selected category once per change.
pub struct ResultReporter {
    sink: Arc<dyn ScoreSink>,
    guard: ChangeGuard<Category>,
    last_response: Arc<Mutex<Option<ScoreResponse>>>,
}

impl ResultReporter {
    pub fn new(sink: Arc<dyn ScoreSink>) -> Self {
        Self {
            sink,
            guard: ChangeGuard::new(),
            last_response: Arc::new(Mutex::new(None)),
        }
    }

    /// Dispatch a report if `category` differs from the last one reported.
    ///
    /// The returned handle may be dropped; the task keeps running.
    pub fn report_if_changed(&mut self, category: Category) -> Option<JoinHandle<()>> {
        if !self.guard.admit(&category) {
            return None;
        }
        Some(best_effort_notify(
            self.sink.as_ref(),
            category,
            Arc::clone(&self.last_response),
        ))
    }

    /// Most recent successful response, if any has arrived.
    pub async fn last_response(&self) -> Option<ScoreResponse> {
        self.last_response.lock().await.clone()
    }
}

/// Send `category` to `sink` on a detached task. Errors are logged and dropped; a
/// successful response overwrites `slot`.
pub fn best_effort_notify(
    sink: &dyn ScoreSink,
    category: Category,
    slot: Arc<Mutex<Option<ScoreResponse>>>,
) -> JoinHandle<()> {
    let request = sink.submit(ScoreUpdate { score: category });
    tokio::spawn(async move {
        match request.await {
            Ok(response) => {
                debug!(%category, "score reported");
                *slot.lock().await = Some(response);
            }
            Err(e) => {
                warn!(%category, error = %e, "score report failed, not retrying");
            }
        }
    })
}
