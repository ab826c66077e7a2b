use super::types::HolderAggregate;
use crate::constants::{
    MAX_CONCURRENT_LOOKUPS_CEILING, TOKEN_ACCOUNT_AMOUNT_OFFSET, TOKEN_ACCOUNT_MIN_LEN,
};
use crate::logger::{self, LogTag};
use crate::rpc::utils::read_u64_le;
use crate::rpc::LedgerClient;
use futures::stream::{self, StreamExt};
use solana_sdk::pubkey::Pubkey;
use std::collections::BTreeMap;
use tokio::time::Instant;

/// What happened while adding free balances
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentOutcome {
    /// Holders whose free balance could not be determined, sorted
    pub degraded: Vec<Pubkey>,
    /// Deadline hit before every lookup finished
    pub truncated: bool,
    pub attempted: usize,
    pub failed: usize,
}

impl EnrichmentOutcome {
    pub fn is_partial(&self) -> bool {
        self.truncated || !self.degraded.is_empty()
    }
}

pub fn clamp_concurrency(requested: usize) -> usize {
    requested.clamp(1, MAX_CONCURRENT_LOOKUPS_CEILING)
}

/// Sum the amount field of every token account returned for an owner
pub fn sum_token_balances(accounts: &[Vec<u8>]) -> Result<u128, String> {
    accounts.iter().try_fold(0u128, |sum, data| {
        if data.len() < TOKEN_ACCOUNT_MIN_LEN {
            return Err(format!(
                "token account too short: {} bytes (need {})",
                data.len(),
                TOKEN_ACCOUNT_MIN_LEN
            ));
        }
        let amount = read_u64_le(data, TOKEN_ACCOUNT_AMOUNT_OFFSET)
            .ok_or_else(|| "token account amount unreadable".to_string())?;
        Ok(sum + u128::from(amount))
    })
}

/// Fill `free` for every holder with one lookup per recipient
///
/// Failed lookups and lookups still pending at the deadline leave the
/// holder at `free = 0` and list it in `degraded`.
pub async fn enrich_free_balances(
    client: &dyn LedgerClient,
    mint: &Pubkey,
    holders: &mut BTreeMap<Pubkey, HolderAggregate>,
    max_concurrent: usize,
    deadline: Instant,
) -> EnrichmentOutcome {
    let limit = clamp_concurrency(max_concurrent);
    let recipients: Vec<Pubkey> = holders.keys().copied().collect();
    let mut outcome = EnrichmentOutcome {
        attempted: recipients.len(),
        ..Default::default()
    };

    logger::debug(
        LogTag::Holders,
        &format!(
            "Fetching free balances for {} holders (concurrency={})",
            recipients.len(),
            limit
        ),
    );

    let lookups = stream::iter(recipients)
        .map(move |owner| async move {
            let result = client
                .get_token_accounts_by_owner(&owner, mint)
                .await
                .map_err(|e| e.to_string())
                .and_then(|accounts| sum_token_balances(&accounts));
            (owner, result)
        })
        .buffer_unordered(limit);
    futures::pin_mut!(lookups);

    loop {
        match tokio::time::timeout_at(deadline, lookups.next()).await {
            Ok(Some((owner, Ok(free)))) => {
                logger::verbose(LogTag::Holders, &format!("Free balance of {}: {}", owner, free));
                if let Some(holder) = holders.get_mut(&owner) {
                    holder.free = Some(free);
                }
            }
            Ok(Some((owner, Err(message)))) => {
                logger::warning(
                    LogTag::Holders,
                    &format!("Free balance lookup failed for {}: {}", owner, message),
                );
                outcome.failed += 1;
            }
            Ok(None) => break,
            Err(_) => {
                logger::warning(
                    LogTag::Holders,
                    "Enrichment deadline reached, remaining holders reported without free balance",
                );
                outcome.truncated = true;
                break;
            }
        }
    }

    for holder in holders.values_mut() {
        if holder.free.is_none() {
            holder.free = Some(0);
            outcome.degraded.push(holder.recipient);
        }
    }

    outcome
}
