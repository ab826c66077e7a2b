use super::decoder::EscrowRecord;
use super::layout::{ESCROW_SIZE, TOKEN_MINT_OFFSET};
use crate::rpc::{DataSlice, MemcmpFilter, ProgramAccountsQuery};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Where the token-mint filter is applied
///
/// The post-decode check always runs. `QueryPredicate` only adds a memcmp
/// filter to the account fetch so the node returns fewer accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MintFilterStrategy {
    #[serde(rename = "query", alias = "query-predicate")]
    QueryPredicate,
    PostDecode,
}

impl MintFilterStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MintFilterStrategy::QueryPredicate => "query",
            MintFilterStrategy::PostDecode => "post-decode",
        }
    }
}

impl Default for MintFilterStrategy {
    fn default() -> Self {
        MintFilterStrategy::QueryPredicate
    }
}

impl FromStr for MintFilterStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "query" | "query-predicate" | "server" => Ok(MintFilterStrategy::QueryPredicate),
            "post-decode" | "post_decode" | "client" => Ok(MintFilterStrategy::PostDecode),
            other => Err(format!(
                "Unknown mint filter strategy '{}' (expected 'query' or 'post-decode')",
                other
            )),
        }
    }
}

impl std::fmt::Display for MintFilterStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Exact 32-byte mint comparison
pub fn matches(record: &EscrowRecord, target_mint: &Pubkey) -> bool {
    record.token_mint == *target_mint
}

/// Build the account fetch query for a strategy
pub fn build_query(
    strategy: MintFilterStrategy,
    target_mint: &Pubkey,
    use_data_slice: bool,
) -> ProgramAccountsQuery {
    let memcmp = match strategy {
        MintFilterStrategy::QueryPredicate => Some(MemcmpFilter {
            offset: TOKEN_MINT_OFFSET,
            bytes: target_mint.to_bytes().to_vec(),
        }),
        MintFilterStrategy::PostDecode => None,
    };

    let data_slice = use_data_slice.then_some(DataSlice {
        offset: 0,
        length: ESCROW_SIZE,
    });

    ProgramAccountsQuery { memcmp, data_slice }
}
