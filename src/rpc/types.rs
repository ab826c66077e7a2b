use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// A raw account returned by `getProgramAccounts`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramAccount {
    pub pubkey: Pubkey,
    pub data: Vec<u8>,
}

/// Optional server-side narrowing for `getProgramAccounts`
///
/// Both fields are optimizations only. Callers must produce the same
/// result whether or not the transport honors them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramAccountsQuery {
    /// Exact byte match at a fixed offset (memcmp)
    pub memcmp: Option<MemcmpFilter>,
    /// Return only `length` bytes starting at `offset`
    pub data_slice: Option<DataSlice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemcmpFilter {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl MemcmpFilter {
    /// Check the filter locally against raw account bytes
    pub fn matches(&self, data: &[u8]) -> bool {
        data.get(self.offset..self.offset + self.bytes.len())
            .map(|window| window == self.bytes.as_slice())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSlice {
    pub offset: usize,
    pub length: usize,
}

/// Filter type for getProgramAccounts
#[derive(Debug, Clone)]
pub enum RpcFilterType {
    /// Filter by memcmp - offset and base58 encoded bytes
    Memcmp { offset: usize, bytes: String },
}

impl RpcFilterType {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            RpcFilterType::Memcmp { offset, bytes } => serde_json::json!({
                "memcmp": {
                    "offset": offset,
                    "bytes": bytes
                }
            }),
        }
    }
}

impl From<&MemcmpFilter> for RpcFilterType {
    fn from(filter: &MemcmpFilter) -> Self {
        RpcFilterType::Memcmp {
            offset: filter.offset,
            bytes: bs58::encode(&filter.bytes).into_string(),
        }
    }
}

#[derive(Debug)]
pub enum RpcError {
    ConnectionFailed(String),
    Timeout,
    InvalidResponse(String),
    ConfigurationError(String),
    RequestFailed(String),
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            RpcError::Timeout => write!(f, "Request timeout"),
            RpcError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            RpcError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            RpcError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
        }
    }
}

impl std::error::Error for RpcError {}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RpcError::Timeout
        } else if err.is_decode() {
            RpcError::InvalidResponse(err.to_string())
        } else {
            RpcError::ConnectionFailed(err.to_string())
        }
    }
}

pub type RpcResult<T> = Result<T, RpcError>;
