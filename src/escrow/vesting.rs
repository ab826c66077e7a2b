use super::decoder::EscrowRecord;
use crate::errors::VestingError;

/// Amounts derived from one escrow's vesting schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VestingBreakdown {
    /// cliff unlock + per-period amount * number of periods
    pub total_vesting: u64,
    pub claimed: u64,
    /// Scheduled but not yet claimed, never negative
    pub locked: u64,
    pub is_cancelled: bool,
}

/// Total amount the schedule will ever release
///
/// Overflow means the on-chain values cannot describe a real token amount,
/// so the record is rejected instead of wrapped or saturated.
pub fn total_vesting(record: &EscrowRecord) -> Result<u64, VestingError> {
    let periodic = record
        .amount_per_period
        .checked_mul(record.number_of_period)
        .ok_or(VestingError::Overflow {
            field: "amount_per_period * number_of_period",
        })?;

    record
        .cliff_unlock_amount
        .checked_add(periodic)
        .ok_or(VestingError::Overflow {
            field: "cliff_unlock_amount + periodic amount",
        })
}

pub fn compute_breakdown(record: &EscrowRecord) -> Result<VestingBreakdown, VestingError> {
    let total_vesting = total_vesting(record)?;
    Ok(VestingBreakdown {
        total_vesting,
        claimed: record.total_claimed_amount,
        locked: total_vesting.saturating_sub(record.total_claimed_amount),
        is_cancelled: record.cancelled_at != 0,
    })
}
