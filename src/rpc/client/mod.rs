//! HTTP JSON-RPC client for the ledger
//!
//! `RpcClient` is constructed once at startup and handed to the scanner as
//! an `Arc<dyn LedgerClient>`. It holds no global state.

mod methods;

pub use methods::LedgerClient;

use crate::config::RpcConfig;
use crate::logger::{self, LogTag};
use crate::rpc::types::{RpcError, RpcResult};
use crate::rpc::utils::mask_url;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub struct RpcClient {
    url: String,
    http: reqwest::Client,
    commitment: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a client for a single endpoint
    pub fn new(url: &str, timeout: Duration, commitment: &str) -> RpcResult<Self> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RpcError::ConfigurationError(format!(
                "RPC endpoint must be an http(s) URL, got '{}'",
                mask_url(url)
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                RpcError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            url: url.to_string(),
            http,
            commitment: commitment.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn from_config(config: &RpcConfig) -> RpcResult<Self> {
        Self::new(
            &config.url,
            Duration::from_secs(config.timeout_secs.max(1)),
            &config.commitment,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn commitment(&self) -> &str {
        &self.commitment
    }

    /// Execute a raw JSON-RPC call and return its `result` member
    pub async fn execute_raw(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> RpcResult<serde_json::Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });

        let start = Instant::now();
        let response = self
            .http
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(RpcError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            logger::warning(
                LogTag::Rpc,
                &format!(
                    "{} failed with HTTP {} from {}",
                    method,
                    status.as_u16(),
                    mask_url(&self.url)
                ),
            );
            return Err(RpcError::ConnectionFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate_body(&body)
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(RpcError::from)?;

        logger::debug(
            LogTag::Rpc,
            &format!(
                "{} completed in {}ms",
                method,
                start.elapsed().as_millis()
            ),
        );

        parse_rpc_envelope(body)
    }
}

/// Split a JSON-RPC response into its result or a typed error
fn parse_rpc_envelope(body: serde_json::Value) -> RpcResult<serde_json::Value> {
    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error");
        return Err(RpcError::RequestFailed(format!("{} (code {})", message, code)));
    }

    match body.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err(RpcError::InvalidResponse(
            "Missing result field".to_string(),
        )),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX_BODY: usize = 200;
    if body.len() <= MAX_BODY {
        body.to_string()
    } else {
        let mut end = MAX_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}
