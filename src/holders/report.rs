use super::types::{EnrichmentMode, EvaluatedEscrow, HolderAggregate, ScanStats};
use crate::errors::RecordIssue;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// One holder in the API response
///
/// Amounts are decimal strings so values above 2^53 survive JSON consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderEntry {
    pub recipient: String,
    pub locked: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    pub escrow_accounts: Vec<String>,
    pub escrow_count: usize,
}

/// Holder summary returned by `GET /api/locks`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub token: String,
    pub program_id: String,
    pub mode: EnrichmentMode,
    pub count: usize,
    pub holders: Vec<HolderEntry>,
    pub partial: bool,
    pub truncated: bool,
    pub degraded: Vec<String>,
    pub diagnostics: Vec<RecordIssue>,
    pub stats: ScanStats,
    pub generated_at: String,
}

/// One matching escrow in the un-aggregated listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowEntry {
    pub escrow_account: String,
    pub recipient: String,
    pub cliff_time: u64,
    pub frequency: u64,
    pub vesting_start_time: u64,
    pub cliff_unlock_amount: String,
    pub amount_per_period: String,
    pub number_of_period: u64,
    pub total_vesting: String,
    pub total_claimed: String,
    pub locked: String,
    pub cancelled: bool,
    pub cancelled_at: u64,
}

/// Per-escrow listing returned by `GET /api/locks/escrows`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowListing {
    pub token: String,
    pub program_id: String,
    pub count: usize,
    pub escrows: Vec<EscrowEntry>,
    pub diagnostics: Vec<RecordIssue>,
    pub stats: ScanStats,
    pub generated_at: String,
}

/// Canonical holder ordering: locked desc, total desc, recipient asc
///
/// The recipient compares as its base58 text, which differs from byte order.
pub fn holder_sort_key(holder: &HolderAggregate) -> (Reverse<u128>, Reverse<u128>, String) {
    (
        Reverse(holder.locked),
        Reverse(holder.total()),
        holder.recipient.to_string(),
    )
}

pub fn holder_entry(holder: &HolderAggregate, mode: EnrichmentMode) -> HolderEntry {
    let (free, total) = if mode.includes_free_balance() {
        (
            Some(holder.free.unwrap_or(0).to_string()),
            Some(holder.total().to_string()),
        )
    } else {
        (None, None)
    };

    HolderEntry {
        recipient: holder.recipient.to_string(),
        locked: holder.locked.to_string(),
        free,
        total,
        escrow_accounts: holder.escrow_accounts.iter().map(|a| a.to_string()).collect(),
        escrow_count: holder.escrow_count(),
    }
}

/// Turn the aggregate map into the ordered holder list
pub fn assemble_holders(
    holders: &BTreeMap<Pubkey, HolderAggregate>,
    mode: EnrichmentMode,
) -> Vec<HolderEntry> {
    let mut ordered: Vec<&HolderAggregate> = holders.values().collect();
    ordered.sort_by_cached_key(|holder| holder_sort_key(holder));
    ordered
        .into_iter()
        .map(|holder| holder_entry(holder, mode))
        .collect()
}

pub fn escrow_entry(evaluated: &EvaluatedEscrow) -> EscrowEntry {
    let record = &evaluated.record;
    let breakdown = &evaluated.breakdown;
    EscrowEntry {
        escrow_account: evaluated.account.to_string(),
        recipient: record.recipient.to_string(),
        cliff_time: record.cliff_time,
        frequency: record.frequency,
        vesting_start_time: record.vesting_start_time,
        cliff_unlock_amount: record.cliff_unlock_amount.to_string(),
        amount_per_period: record.amount_per_period.to_string(),
        number_of_period: record.number_of_period,
        total_vesting: breakdown.total_vesting.to_string(),
        total_claimed: breakdown.claimed.to_string(),
        locked: breakdown.locked.to_string(),
        cancelled: breakdown.is_cancelled,
        cancelled_at: record.cancelled_at,
    }
}

/// Ordered by escrow account string
pub fn assemble_escrows(escrows: &BTreeMap<Pubkey, EvaluatedEscrow>) -> Vec<EscrowEntry> {
    let mut entries: Vec<EscrowEntry> = escrows.values().map(escrow_entry).collect();
    entries.sort_by(|a, b| a.escrow_account.cmp(&b.escrow_account));
    entries
}
