//! Ledger collaborator contract and its JSON-RPC implementation
//!
//! The scanner only needs two reads from the ledger, so the trait is kept
//! to exactly those two methods. Tests substitute an in-memory ledger.

use super::RpcClient;
use crate::rpc::types::{ProgramAccount, ProgramAccountsQuery, RpcError, RpcFilterType, RpcResult};
use crate::rpc::utils::{decode_account_data, parse_pubkey_string};
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

/// Read-only ledger operations used by the lock scanner
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Get all accounts owned by a program
    ///
    /// `query` may narrow the result server-side. Implementations are free
    /// to ignore it; callers re-check everything locally.
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        query: &ProgramAccountsQuery,
    ) -> RpcResult<Vec<ProgramAccount>>;

    /// Get the raw token accounts an owner holds for one mint
    async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> RpcResult<Vec<Vec<u8>>>;
}

#[async_trait]
impl LedgerClient for RpcClient {
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        query: &ProgramAccountsQuery,
    ) -> RpcResult<Vec<ProgramAccount>> {
        let mut config = serde_json::Map::new();

        config.insert(
            "encoding".to_string(),
            serde_json::Value::String("base64".to_string()),
        );
        config.insert(
            "commitment".to_string(),
            serde_json::Value::String(self.commitment().to_string()),
        );

        if let Some(slice) = query.data_slice {
            config.insert(
                "dataSlice".to_string(),
                serde_json::json!({
                    "offset": slice.offset,
                    "length": slice.length
                }),
            );
        }

        if let Some(memcmp) = &query.memcmp {
            let filters = vec![RpcFilterType::from(memcmp).to_json()];
            config.insert("filters".to_string(), serde_json::Value::Array(filters));
        }

        let params = serde_json::json!([
            program_id.to_string(),
            serde_json::Value::Object(config)
        ]);

        let result = self.execute_raw("getProgramAccounts", params).await?;

        parse_program_accounts(&result)
    }

    async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> RpcResult<Vec<Vec<u8>>> {
        let params = serde_json::json!([
            owner.to_string(),
            { "mint": mint.to_string() },
            { "encoding": "base64", "commitment": self.commitment() }
        ]);

        let result = self.execute_raw("getTokenAccountsByOwner", params).await?;

        parse_token_accounts(&result)
    }
}

fn parse_program_accounts(result: &serde_json::Value) -> RpcResult<Vec<ProgramAccount>> {
    let accounts_array = result
        .as_array()
        .ok_or_else(|| RpcError::InvalidResponse("expected array".to_string()))?;

    let mut accounts = Vec::with_capacity(accounts_array.len());

    for item in accounts_array {
        let pubkey_str = item
            .get("pubkey")
            .and_then(|v| v.as_str())
            .ok_or_else(|| RpcError::InvalidResponse("Missing pubkey field".to_string()))?;

        let pubkey = parse_pubkey_string(pubkey_str).map_err(RpcError::InvalidResponse)?;

        let account = item
            .get("account")
            .ok_or_else(|| RpcError::InvalidResponse("Missing account field".to_string()))?;

        let data = decode_account_data(account).map_err(RpcError::InvalidResponse)?;

        accounts.push(ProgramAccount { pubkey, data });
    }

    Ok(accounts)
}

fn parse_token_accounts(result: &serde_json::Value) -> RpcResult<Vec<Vec<u8>>> {
    let values = result
        .get("value")
        .and_then(|v| v.as_array())
        .ok_or_else(|| RpcError::InvalidResponse("Missing value array".to_string()))?;

    values
        .iter()
        .map(|item| {
            let account = item
                .get("account")
                .ok_or_else(|| RpcError::InvalidResponse("Missing account field".to_string()))?;
            decode_account_data(account).map_err(RpcError::InvalidResponse)
        })
        .collect()
}
