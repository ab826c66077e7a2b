//! In-memory ledger used by unit tests

use super::client::LedgerClient;
use super::types::{ProgramAccount, ProgramAccountsQuery, RpcError, RpcResult};
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockLedger {
    pub accounts: Vec<ProgramAccount>,
    pub balances: HashMap<Pubkey, Vec<Vec<u8>>>,
    pub failing_owners: HashSet<Pubkey>,
    pub program_error: Option<String>,
    pub program_delay: Option<Duration>,
    pub lookup_delay: Option<Duration>,
    /// Apply memcmp/dataSlice like a real node would
    pub honor_query: bool,
    pub queries: Mutex<Vec<ProgramAccountsQuery>>,
    pub lookups: Mutex<Vec<Pubkey>>,
}

impl MockLedger {
    pub fn with_accounts(accounts: Vec<ProgramAccount>) -> Self {
        Self {
            accounts,
            honor_query: true,
            ..Default::default()
        }
    }

    pub fn set_balance(&mut self, owner: Pubkey, amounts: &[u64]) {
        let blobs = amounts.iter().map(|amount| token_account_blob(*amount)).collect();
        self.balances.insert(owner, blobs);
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().map(|l| l.len()).unwrap_or(0)
    }
}

/// A 165-byte SPL token account with only the amount field populated
pub fn token_account_blob(amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; 165];
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    data
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn get_program_accounts(
        &self,
        _program_id: &Pubkey,
        query: &ProgramAccountsQuery,
    ) -> RpcResult<Vec<ProgramAccount>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
        if let Some(delay) = self.program_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.program_error {
            return Err(RpcError::ConnectionFailed(message.clone()));
        }

        let mut accounts = self.accounts.clone();
        if self.honor_query {
            if let Some(memcmp) = &query.memcmp {
                accounts.retain(|account| memcmp.matches(&account.data));
            }
            if let Some(slice) = query.data_slice {
                for account in accounts.iter_mut() {
                    let start = slice.offset.min(account.data.len());
                    let end = (slice.offset + slice.length).min(account.data.len());
                    account.data = account.data[start..end].to_vec();
                }
            }
        }
        Ok(accounts)
    }

    async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        _mint: &Pubkey,
    ) -> RpcResult<Vec<Vec<u8>>> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(*owner);
        }
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_owners.contains(owner) {
            return Err(RpcError::RequestFailed(format!("lookup failed for {}", owner)));
        }
        Ok(self.balances.get(owner).cloned().unwrap_or_default())
    }
}
