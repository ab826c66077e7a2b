/// Lock scanner
///
/// Runs one point-in-time scan: fetch the lock program's accounts, decode
/// and aggregate them on the rayon pool, optionally enrich each holder with
/// a free balance, and assemble the report. The whole scan is bounded by
/// `scan.deadline_secs`.
use crate::config::Config;
use crate::errors::ScanError;
use crate::escrow::{build_query, MintFilterStrategy};
use crate::holders::{
    aggregate_accounts, assemble_escrows, assemble_holders, enrich_free_balances, Aggregation,
    EnrichmentMode, EscrowListing, ScanReport,
};
use crate::logger::{self, LogTag};
use crate::rpc::{LedgerClient, ProgramAccount};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Settings resolved once from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub program_id: Pubkey,
    pub token_mint: Pubkey,
    pub strategy: MintFilterStrategy,
    pub use_data_slice: bool,
    pub deadline: Duration,
    pub max_concurrent_lookups: usize,
    /// Mode used when the caller does not pick one
    pub default_mode: EnrichmentMode,
}

impl ScanSettings {
    pub fn from_config(config: &Config) -> Result<Self, ScanError> {
        let program_id = config.lock.program_pubkey().map_err(ScanError::Configuration)?;
        let token_mint = config.lock.mint_pubkey().map_err(ScanError::Configuration)?;

        Ok(Self {
            program_id,
            token_mint,
            strategy: config.scan.mint_filter_strategy,
            use_data_slice: config.scan.use_data_slice,
            deadline: Duration::from_secs(config.scan.deadline_secs),
            max_concurrent_lookups: config.enrichment.max_concurrent_lookups,
            default_mode: EnrichmentMode::from_flag(config.enrichment.enabled),
        })
    }
}

pub struct LockScanner {
    client: Arc<dyn LedgerClient>,
    settings: ScanSettings,
}

impl LockScanner {
    pub fn new(client: Arc<dyn LedgerClient>, settings: ScanSettings) -> Self {
        Self { client, settings }
    }

    /// Holder report in the requested mode, or the configured default
    pub async fn scan(&self, mode: Option<EnrichmentMode>) -> Result<ScanReport, ScanError> {
        let mode = mode.unwrap_or(self.settings.default_mode);
        let started = Instant::now();
        let deadline = started + self.settings.deadline;

        let mut aggregation = self.fetch_and_aggregate(deadline).await?;

        let mut degraded = Vec::new();
        let mut truncated = false;
        if mode.includes_free_balance() {
            let outcome = enrich_free_balances(
                self.client.as_ref(),
                &self.settings.token_mint,
                &mut aggregation.holders,
                self.settings.max_concurrent_lookups,
                deadline,
            )
            .await;
            aggregation.stats.lookups_attempted = outcome.attempted;
            aggregation.stats.lookups_failed = outcome.failed;
            truncated = outcome.truncated;
            degraded = outcome.degraded.iter().map(|p| p.to_string()).collect();
        }

        aggregation.stats.elapsed_ms = started.elapsed().as_millis() as u64;
        let holders = assemble_holders(&aggregation.holders, mode);

        logger::info(
            LogTag::Scanner,
            &format!(
                "Scan complete: {} holders from {} accounts ({} mismatched, {} rejected, {} degraded) in {}ms",
                holders.len(),
                aggregation.stats.scanned,
                aggregation.stats.mint_mismatches,
                aggregation.stats.rejected,
                degraded.len(),
                aggregation.stats.elapsed_ms
            ),
        );

        Ok(ScanReport {
            token: self.settings.token_mint.to_string(),
            program_id: self.settings.program_id.to_string(),
            mode,
            count: holders.len(),
            holders,
            partial: truncated || !degraded.is_empty(),
            truncated,
            degraded,
            diagnostics: aggregation.diagnostics,
            stats: aggregation.stats,
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// One entry per matching escrow, without aggregation
    pub async fn list_escrows(&self) -> Result<EscrowListing, ScanError> {
        let started = Instant::now();
        let mut aggregation = self
            .fetch_and_aggregate(started + self.settings.deadline)
            .await?;
        aggregation.stats.elapsed_ms = started.elapsed().as_millis() as u64;

        let escrows = assemble_escrows(&aggregation.escrows);
        Ok(EscrowListing {
            token: self.settings.token_mint.to_string(),
            program_id: self.settings.program_id.to_string(),
            count: escrows.len(),
            escrows,
            diagnostics: aggregation.diagnostics,
            stats: aggregation.stats,
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    async fn fetch_and_aggregate(&self, deadline: Instant) -> Result<Aggregation, ScanError> {
        let accounts = self.fetch_accounts(deadline).await?;
        logger::debug(
            LogTag::Scanner,
            &format!("Fetched {} program accounts", accounts.len()),
        );

        let aggregation = aggregate_accounts(&accounts, &self.settings.token_mint);
        for issue in &aggregation.diagnostics {
            logger::warning(
                LogTag::Escrow,
                &format!("Rejected escrow {}: {}", issue.account, issue.message),
            );
        }
        Ok(aggregation)
    }

    async fn fetch_accounts(&self, deadline: Instant) -> Result<Vec<ProgramAccount>, ScanError> {
        let query = build_query(
            self.settings.strategy,
            &self.settings.token_mint,
            self.settings.use_data_slice,
        );

        logger::debug(
            LogTag::Scanner,
            &format!(
                "Fetching accounts of {} (strategy={}, data_slice={})",
                self.settings.program_id, self.settings.strategy, self.settings.use_data_slice
            ),
        );

        let fetch = self
            .client
            .get_program_accounts(&self.settings.program_id, &query);

        match tokio::time::timeout_at(deadline, fetch).await {
            Ok(Ok(accounts)) => Ok(accounts),
            Ok(Err(e)) => {
                logger::error(LogTag::Scanner, &format!("Account fetch failed: {}", e));
                Err(ScanError::Transport(e))
            }
            Err(_) => {
                logger::error(
                    LogTag::Scanner,
                    &format!(
                        "Account fetch missed the {}s deadline",
                        self.settings.deadline.as_secs()
                    ),
                );
                Err(ScanError::Timeout {
                    seconds: self.settings.deadline.as_secs(),
                })
            }
        }
    }
}
