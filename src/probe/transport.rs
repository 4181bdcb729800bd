//! HTTP capability used by probes.
//!
//! # Responsibilities
//! - Issue one GET per call, bounded by a deadline
//! - Report status and (optionally) body text
//! - Classify failures as timeout, transport or invalid URL
//!
//! # Design Decisions
//! - Deadline enforced with `tokio::time::timeout` around the whole exchange
//!   (connect, headers and body)
//! - No retries and no caching: every call hits the network
//! - Trait seam so the decision engine can run against scripted responses

use std::future::Future;
use std::time::Duration;

use tokio::time;
use url::Url;

/// What a probe gets to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    /// Response text; empty when the body was not requested.
    pub body: String,
}

impl ProbeResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Why a probe request produced no response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("probe timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid probe URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Asynchronous GET primitive.
pub trait Transport: Send + Sync {
    /// Fetch `url` within `timeout`. The body is read only if `read_body`.
    fn get(
        &self,
        url: &str,
        timeout: Duration,
        read_body: bool,
    ) -> impl Future<Output = Result<ProbeResponse, ProbeError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn get(
        &self,
        url: &str,
        timeout: Duration,
        read_body: bool,
    ) -> impl Future<Output = Result<ProbeResponse, ProbeError>> + Send {
        (**self).get(url, timeout, read_body)
    }
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("smart-tunnel-probe/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
        read_body: bool,
    ) -> Result<ProbeResponse, ProbeError> {
        let target = Url::parse(url).map_err(|e| ProbeError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let exchange = async {
            let response = self.client.get(target).send().await?;
            let status = response.status().as_u16();
            let body = if read_body {
                response.text().await?
            } else {
                String::new()
            };
            Ok::<_, reqwest::Error>(ProbeResponse { status, body })
        };

        match time::timeout(timeout, exchange).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(ProbeError::Transport(e.to_string())),
            Err(_) => Err(ProbeError::Timeout(timeout)),
        }
    }
}
