//! RPC utility functions
//!
//! Common utilities for RPC operations.

use base64::Engine;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Parse a pubkey from string safely
///
/// Wrapper around `Pubkey::from_str` with better error messages.
pub fn parse_pubkey_string(s: &str) -> Result<Pubkey, String> {
    Pubkey::from_str(s.trim()).map_err(|e| format!("Invalid pubkey '{}': {}", s, e))
}

/// Extract raw account bytes from a JSON-RPC account object
///
/// Accepts both the `[data, "base64"]` array form and a bare base64 string.
pub fn decode_account_data(value: &serde_json::Value) -> Result<Vec<u8>, String> {
    let data = value.get("data").ok_or("Missing data field")?;

    if let Some(arr) = data.as_array() {
        // [data_base64, encoding]
        let encoded = arr
            .first()
            .and_then(|v| v.as_str())
            .ok_or("Invalid data")?;
        let encoding = arr.get(1).and_then(|v| v.as_str()).unwrap_or("base64");

        if encoding == "base64" {
            base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| format!("Failed to decode base64: {}", e))
        } else {
            Err(format!("Unsupported encoding: {}", encoding))
        }
    } else if let Some(s) = data.as_str() {
        // Direct base64 string
        base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(|e| format!("Failed to decode base64: {}", e))
    } else {
        Err("Invalid data format".to_string())
    }
}

/// Read a little-endian u64 at `offset`, if the buffer is long enough
pub fn read_u64_le(data: &[u8], offset: usize) -> Option<u64> {
    let bytes: [u8; 8] = data.get(offset..offset + 8)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

/// Mask the path and query of an RPC URL (API keys live there)
pub fn mask_url(url: &str) -> String {
    match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            let host_end = rest.find(|c: char| c == '/' || c == '?').unwrap_or(rest.len());
            if host_end == rest.len() {
                url.to_string()
            } else {
                format!("{}://{}/***", &url[..scheme_end], &rest[..host_end])
            }
        }
        None => "***".to_string(),
    }
}
