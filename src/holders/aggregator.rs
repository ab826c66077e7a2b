use super::types::{EvaluatedEscrow, HolderAggregate, RecordOutcome, ScanStats};
use crate::errors::{IssueKind, RecordIssue};
use crate::escrow::{self, compute_breakdown, decode_escrow};
use crate::logger::{self, LogTag};
use crate::rpc::ProgramAccount;
use rayon::prelude::*;
use solana_sdk::pubkey::Pubkey;
use std::collections::BTreeMap;

/// Everything the fold produced from one batch of accounts
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub holders: BTreeMap<Pubkey, HolderAggregate>,
    /// Included escrows keyed by escrow account
    pub escrows: BTreeMap<Pubkey, EvaluatedEscrow>,
    pub diagnostics: Vec<RecordIssue>,
    pub stats: ScanStats,
}

/// Decode, filter and evaluate a single account
pub fn evaluate_account(account: &ProgramAccount, target_mint: &Pubkey) -> RecordOutcome {
    let account_id = account.pubkey.to_string();

    let record = match decode_escrow(&account.data) {
        Ok(record) => record,
        Err(e) => return RecordOutcome::Issue(RecordIssue::from_decode(&account_id, &e)),
    };

    if !escrow::matches(&record, target_mint) {
        return RecordOutcome::Excluded;
    }

    match compute_breakdown(&record) {
        Ok(breakdown) => RecordOutcome::Included(EvaluatedEscrow {
            account: account.pubkey,
            record,
            breakdown,
        }),
        Err(e) => RecordOutcome::Issue(RecordIssue::from_vesting(&account_id, &e)),
    }
}

/// Collapse repeated account ids before evaluation
///
/// Identical copies count once. Copies with differing data cannot be
/// ordered meaningfully, so the account is rejected as a whole. Output is
/// sorted by account id whatever the input order.
pub fn dedup_accounts(accounts: &[ProgramAccount]) -> (Vec<&ProgramAccount>, Vec<RecordIssue>) {
    let mut by_id: BTreeMap<Pubkey, Vec<&ProgramAccount>> = BTreeMap::new();
    for account in accounts {
        by_id.entry(account.pubkey).or_default().push(account);
    }

    let mut unique = Vec::with_capacity(by_id.len());
    let mut conflicts = Vec::new();
    for (pubkey, copies) in by_id {
        let Some(first) = copies.first().copied() else {
            continue;
        };
        if copies.iter().all(|copy| copy.data == first.data) {
            unique.push(first);
        } else {
            conflicts.push(RecordIssue::conflicting_duplicate(
                &pubkey.to_string(),
                copies.len(),
            ));
        }
    }

    (unique, conflicts)
}

/// Evaluate every account on the rayon pool
///
/// Output order follows input order, but nothing downstream depends on it.
pub fn evaluate_accounts(accounts: &[&ProgramAccount], target_mint: &Pubkey) -> Vec<RecordOutcome> {
    accounts
        .par_iter()
        .map(|account| evaluate_account(account, target_mint))
        .collect()
}

/// Fold evaluated records into one aggregate per recipient
///
/// Expects one outcome per account id, which `dedup_accounts` guarantees.
pub fn fold_outcomes(outcomes: Vec<RecordOutcome>) -> Aggregation {
    let mut aggregation = Aggregation::default();
    aggregation.stats.scanned = outcomes.len();

    for outcome in outcomes {
        match outcome {
            RecordOutcome::Included(evaluated) => {
                aggregation.stats.decoded += 1;
                aggregation.stats.included += 1;

                let holder = aggregation
                    .holders
                    .entry(evaluated.record.recipient)
                    .or_insert_with(|| HolderAggregate::new(evaluated.record.recipient));
                holder.escrow_accounts.insert(evaluated.account);
                holder.locked += u128::from(evaluated.breakdown.locked);
                aggregation.escrows.insert(evaluated.account, evaluated);
            }
            RecordOutcome::Excluded => {
                aggregation.stats.decoded += 1;
                aggregation.stats.mint_mismatches += 1;
            }
            RecordOutcome::Issue(issue) => {
                logger::debug(
                    LogTag::Holders,
                    &format!("Skipping escrow {}: {}", issue.account, issue.message),
                );
                if issue.kind == IssueKind::Overflow {
                    aggregation.stats.decoded += 1;
                }
                aggregation.stats.rejected += 1;
                aggregation.diagnostics.push(issue);
            }
        }
    }

    aggregation
        .diagnostics
        .sort_by(|a, b| a.account.cmp(&b.account));

    aggregation
}

/// Run the full pure pipeline over a batch of accounts
pub fn aggregate_accounts(accounts: &[ProgramAccount], target_mint: &Pubkey) -> Aggregation {
    let (unique, conflicts) = dedup_accounts(accounts);
    let mut outcomes = evaluate_accounts(&unique, target_mint);
    outcomes.extend(conflicts.into_iter().map(RecordOutcome::Issue));
    fold_outcomes(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escrow::fixtures::{unique_pubkey, EscrowBuilder};
    use rand::seq::SliceRandom;

    #[test]
    fn test_two_escrows_same_recipient() {
        let recipient = unique_pubkey();
        let mint = unique_pubkey();
        let accounts = vec![
            EscrowBuilder::schedule(recipient, mint, 100, 10, 5, 50).account(),
            EscrowBuilder::schedule(recipient, mint, 0, 20, 2, 40).account(),
        ];

        let aggregation = aggregate_accounts(&accounts, &mint);
        assert_eq!(aggregation.holders.len(), 1);

        let holder = &aggregation.holders[&recipient];
        assert_eq!(holder.locked, 100);
        assert_eq!(holder.escrow_count(), 2);
        assert_eq!(holder.free, None);
        assert_eq!(holder.total(), 100);
    }

    #[test]
    fn test_mixed_mints_yield_single_holder() {
        let target = unique_pubkey();
        let other = unique_pubkey();
        let kept = unique_pubkey();
        let accounts = vec![
            EscrowBuilder::schedule(kept, target, 10, 0, 0, 0).account(),
            EscrowBuilder::schedule(unique_pubkey(), other, 1_000, 0, 0, 0).account(),
        ];

        let aggregation = aggregate_accounts(&accounts, &target);
        assert_eq!(aggregation.holders.len(), 1);
        assert_eq!(aggregation.holders[&kept].locked, 10);
        assert_eq!(aggregation.stats.mint_mismatches, 1);
        assert!(aggregation.diagnostics.is_empty());
    }

    #[test]
    fn test_short_and_overflowing_records_become_diagnostics() {
        let mint = unique_pubkey();
        let recipient = unique_pubkey();
        let short = ProgramAccount {
            pubkey: unique_pubkey(),
            data: vec![0u8; 100],
        };
        let overflow = EscrowBuilder::schedule(recipient, mint, 0, u64::MAX, 3, 0).account();
        let good = EscrowBuilder::schedule(recipient, mint, 5, 0, 0, 0).account();

        let aggregation = aggregate_accounts(&[short.clone(), overflow.clone(), good], &mint);
        assert_eq!(aggregation.stats.scanned, 3);
        assert_eq!(aggregation.stats.rejected, 2);
        assert_eq!(aggregation.holders[&recipient].locked, 5);

        let kinds: Vec<(String, IssueKind)> = aggregation
            .diagnostics
            .iter()
            .map(|issue| (issue.account.clone(), issue.kind))
            .collect();
        assert!(kinds.contains(&(short.pubkey.to_string(), IssueKind::ShortBuffer)));
        assert!(kinds.contains(&(overflow.pubkey.to_string(), IssueKind::Overflow)));
    }

    #[test]
    fn test_overflow_on_other_mint_is_only_a_mismatch() {
        let target = unique_pubkey();
        let accounts =
            vec![EscrowBuilder::schedule(unique_pubkey(), unique_pubkey(), 0, u64::MAX, 2, 0).account()];

        let aggregation = aggregate_accounts(&accounts, &target);
        assert!(aggregation.diagnostics.is_empty());
        assert_eq!(aggregation.stats.mint_mismatches, 1);
    }

    #[test]
    fn test_fold_is_order_independent() {
        let mint = unique_pubkey();
        let recipients: Vec<Pubkey> = (0..5).map(|_| unique_pubkey()).collect();
        let mut accounts: Vec<ProgramAccount> = (0..40u64)
            .map(|i| {
                let recipient = recipients[(i % 5) as usize];
                EscrowBuilder::schedule(recipient, mint, i * 1_000, i, i, i * 3).account()
            })
            .collect();
        accounts.push(ProgramAccount {
            pubkey: unique_pubkey(),
            data: vec![1u8; 12],
        });

        let baseline = aggregate_accounts(&accounts, &mint);
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            accounts.shuffle(&mut rng);
            let shuffled = aggregate_accounts(&accounts, &mint);
            assert_eq!(shuffled.holders, baseline.holders);
            assert_eq!(shuffled.diagnostics, baseline.diagnostics);
            assert_eq!(shuffled.stats, baseline.stats);
        }
    }

    #[test]
    fn test_duplicate_escrow_counted_once() {
        let mint = unique_pubkey();
        let recipient = unique_pubkey();
        let account = EscrowBuilder::schedule(recipient, mint, 70, 0, 0, 0).account();

        let aggregation = aggregate_accounts(&[account.clone(), account], &mint);
        assert_eq!(aggregation.holders[&recipient].locked, 70);
        assert_eq!(aggregation.stats.scanned, 1);
        assert_eq!(aggregation.stats.decoded, 1);
        assert_eq!(aggregation.stats.included, 1);
    }

    #[test]
    fn test_duplicate_bad_record_reported_once() {
        let short = ProgramAccount {
            pubkey: unique_pubkey(),
            data: vec![0u8; 40],
        };

        let aggregation = aggregate_accounts(&[short.clone(), short], &unique_pubkey());
        assert_eq!(aggregation.stats.rejected, 1);
        assert_eq!(aggregation.diagnostics.len(), 1);
        assert_eq!(aggregation.diagnostics[0].kind, IssueKind::ShortBuffer);
    }

    #[test]
    fn test_conflicting_duplicate_rejected_in_any_order() {
        let mint = unique_pubkey();
        let recipient = unique_pubkey();
        let low = EscrowBuilder::schedule(recipient, mint, 10, 0, 0, 0).account();
        let high = ProgramAccount {
            pubkey: low.pubkey,
            data: EscrowBuilder::schedule(recipient, mint, 99, 0, 0, 0).build(),
        };
        let other = EscrowBuilder::schedule(recipient, mint, 5, 0, 0, 0).account();

        let mut accounts = vec![low.clone(), high, other];
        let baseline = aggregate_accounts(&accounts, &mint);
        assert_eq!(baseline.holders[&recipient].locked, 5);
        assert_eq!(baseline.stats.scanned, 2);
        assert_eq!(baseline.stats.rejected, 1);
        assert_eq!(baseline.diagnostics.len(), 1);
        assert_eq!(baseline.diagnostics[0].kind, IssueKind::DuplicateAccount);
        assert_eq!(baseline.diagnostics[0].account, low.pubkey.to_string());

        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            accounts.shuffle(&mut rng);
            let shuffled = aggregate_accounts(&accounts, &mint);
            assert_eq!(shuffled.holders, baseline.holders);
            assert_eq!(shuffled.diagnostics, baseline.diagnostics);
            assert_eq!(shuffled.stats, baseline.stats);
        }
    }

    #[test]
    fn test_sum_beyond_u64_is_exact() {
        let mint = unique_pubkey();
        let recipient = unique_pubkey();
        let accounts = vec![
            EscrowBuilder::schedule(recipient, mint, u64::MAX, 0, 0, 0).account(),
            EscrowBuilder::schedule(recipient, mint, u64::MAX, 0, 0, 0).account(),
        ];

        let aggregation = aggregate_accounts(&accounts, &mint);
        assert_eq!(
            aggregation.holders[&recipient].locked,
            u128::from(u64::MAX) * 2
        );
    }
}
