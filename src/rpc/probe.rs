//! RPC endpoint probing
//!
//! Startup check that the configured endpoint answers `getHealth`, so a bad
//! `RPC_ENDPOINT` shows up in the logs before the first request does.

use super::client::RpcClient;
use super::utils::mask_url;
use crate::logger::{self, LogTag};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// RPC endpoint probe result with latency
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointProbe {
    pub url: String,
    pub healthy: bool,
    pub latency_ms: u64,
    pub version: Option<String>,
    pub error: Option<String>,
}

/// Probe an endpoint with `getHealth` followed by `getVersion`
///
/// Never fails; problems are reported inside the probe result.
pub async fn probe_endpoint(client: &RpcClient) -> EndpointProbe {
    let url = mask_url(client.url());
    let start = Instant::now();

    let health = client.execute_raw("getHealth", serde_json::json!([])).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    if let Err(e) = health {
        logger::warning(
            LogTag::Rpc,
            &format!("Endpoint {} failed health probe: {}", url, e),
        );
        return EndpointProbe {
            url,
            healthy: false,
            latency_ms,
            version: None,
            error: Some(e.to_string()),
        };
    }

    let version = client
        .execute_raw("getVersion", serde_json::json!([]))
        .await
        .ok()
        .and_then(|v| v.get("solana-core").and_then(|s| s.as_str()).map(String::from));

    logger::info(
        LogTag::Rpc,
        &format!(
            "Endpoint {} healthy ({}ms, version {})",
            url,
            latency_ms,
            version.as_deref().unwrap_or("unknown")
        ),
    );

    EndpointProbe {
        url,
        healthy: true,
        latency_ms,
        version,
        error: None,
    }
}
