//! Delivery of batches to the server
//!
//! A batch is serialized as a JSON array of [`Metrics`], signed over the
//! uncompressed bytes, then optionally gzip-compressed. Each POST is retried
//! according to the configured [`RetryPolicy`]; any transport error or
//! non-2xx answer counts as a failed attempt.

use crate::config::AgentConfig;
use crate::core::models::Metrics;
use crate::storage::StoreSnapshot;
use crate::utils::codec;
use crate::utils::crypto::{HASH_HEADER, Signer};
use crate::utils::error::{MetricsError, Result, RetryPolicy};
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// Per-request timeout of the HTTP client
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Serialized, signed and possibly compressed batch
#[derive(Debug, Clone)]
pub struct EncodedBatch {
    /// Request body
    pub body: Vec<u8>,
    /// Hex HMAC of the uncompressed JSON
    pub signature: Option<String>,
    /// Whether `body` is gzip-compressed
    pub gzip: bool,
    /// Number of metrics in the batch
    pub len: usize,
}

/// HTTP sender for metric batches
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    http: reqwest::Client,
    url: String,
    signer: Option<Signer>,
    compress: bool,
    retry: RetryPolicy,
}

impl DeliveryClient {
    /// Create a client posting to the batch endpoint of `config.address`
    pub fn new(config: &AgentConfig, retry: RetryPolicy) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            url: config.updates_url(),
            signer: config.key().and_then(Signer::from_config),
            compress: config.compress,
            retry,
        })
    }

    /// Target URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Serialize, sign and compress a batch; `None` when there is nothing to send
    pub fn encode(&self, batch: &StoreSnapshot) -> Result<Option<EncodedBatch>> {
        if batch.is_empty() {
            return Ok(None);
        }

        let metrics: Vec<Metrics> = batch.records().into_iter().map(Metrics::from).collect();
        let json = serde_json::to_vec(&metrics)?;

        let signature = match &self.signer {
            Some(signer) => Some(signer.sign(&json)?),
            None => None,
        };

        let body = if self.compress {
            codec::compress(&json)?
        } else {
            json
        };

        Ok(Some(EncodedBatch {
            body,
            signature,
            gzip: self.compress,
            len: metrics.len(),
        }))
    }

    async fn post_once(&self, batch: &EncodedBatch) -> Result<()> {
        let mut request = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json");
        if batch.gzip {
            request = request.header(CONTENT_ENCODING, codec::GZIP);
        }
        if let Some(signature) = &batch.signature {
            request = request.header(HASH_HEADER, signature.as_str());
        }

        let response = request
            .body(batch.body.clone())
            .send()
            .await
            .map_err(|e| MetricsError::transport(format!("POST {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetricsError::transport(format!(
                "POST {} answered {}",
                self.url, status
            )));
        }
        Ok(())
    }

    /// Send a batch, retrying per the backoff schedule
    pub async fn deliver(&self, batch: &StoreSnapshot) -> Result<()> {
        let Some(encoded) = self.encode(batch)? else {
            debug!("Nothing to deliver");
            return Ok(());
        };

        self.retry.call(|| self.post_once(&encoded)).await?;
        debug!("Delivered {} metrics to {}", encoded.len, self.url);
        Ok(())
    }
}
