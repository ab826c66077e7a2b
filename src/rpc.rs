/// Ledger RPC access
///
/// This module provides the `LedgerClient` contract the scanner depends on,
/// the HTTP JSON-RPC implementation used in production, and helpers for
/// decoding account payloads.
pub mod client;
pub mod probe;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{LedgerClient, RpcClient};
pub use probe::{probe_endpoint, EndpointProbe};
pub use types::{
    DataSlice, MemcmpFilter, ProgramAccount, ProgramAccountsQuery, RpcError, RpcFilterType,
    RpcResult,
};
