/// Holder aggregation
///
/// Folds evaluated escrow records into one aggregate per recipient,
/// optionally adds the recipient's free token balance and assembles the
/// ordered API response.
pub mod aggregator;
pub mod enrichment;
pub mod report;
pub mod types;

pub use aggregator::{aggregate_accounts, dedup_accounts, evaluate_account, fold_outcomes, Aggregation};
pub use enrichment::{enrich_free_balances, sum_token_balances, EnrichmentOutcome};
pub use report::{assemble_escrows, assemble_holders, EscrowEntry, EscrowListing, HolderEntry, ScanReport};
pub use types::{EnrichmentMode, EvaluatedEscrow, HolderAggregate, RecordOutcome, ScanStats};
