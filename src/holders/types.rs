use crate::errors::RecordIssue;
use crate::escrow::{EscrowRecord, VestingBreakdown};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::collections::BTreeSet;

/// Whether holder reports include the spot token balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrichmentMode {
    LockedOnly,
    WithFreeBalance,
}

impl EnrichmentMode {
    pub fn from_flag(enrich: bool) -> Self {
        if enrich {
            EnrichmentMode::WithFreeBalance
        } else {
            EnrichmentMode::LockedOnly
        }
    }

    pub fn includes_free_balance(&self) -> bool {
        matches!(self, EnrichmentMode::WithFreeBalance)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichmentMode::LockedOnly => "locked-only",
            EnrichmentMode::WithFreeBalance => "with-free-balance",
        }
    }
}

/// A decoded escrow that passed the mint filter and the vesting math
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedEscrow {
    pub account: Pubkey,
    pub record: EscrowRecord,
    pub breakdown: VestingBreakdown,
}

/// Result of running one fetched account through decode, filter and math
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Included(EvaluatedEscrow),
    /// Decoded fine but belongs to another token
    Excluded,
    Issue(RecordIssue),
}

/// Per-recipient balance summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderAggregate {
    pub recipient: Pubkey,
    pub locked: u128,
    /// None until enrichment ran for this holder
    pub free: Option<u128>,
    pub escrow_accounts: BTreeSet<Pubkey>,
}

impl HolderAggregate {
    pub fn new(recipient: Pubkey) -> Self {
        Self {
            recipient,
            locked: 0,
            free: None,
            escrow_accounts: BTreeSet::new(),
        }
    }

    pub fn total(&self) -> u128 {
        self.locked + self.free.unwrap_or(0)
    }

    pub fn escrow_count(&self) -> usize {
        self.escrow_accounts.len()
    }
}

/// Counters describing what happened to the fetched accounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    /// Accounts returned by the ledger
    pub scanned: usize,
    pub decoded: usize,
    pub mint_mismatches: usize,
    /// Short buffers and overflowing schedules
    pub rejected: usize,
    pub included: usize,
    pub lookups_attempted: usize,
    pub lookups_failed: usize,
    pub elapsed_ms: u64,
}
