use super::layout::*;
use crate::errors::DecodeError;
use solana_sdk::pubkey::Pubkey;

/// Decoded vesting escrow record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowRecord {
    pub recipient: Pubkey,
    pub token_mint: Pubkey,
    pub creator: Pubkey,
    pub base: Pubkey,
    pub escrow_bump: u8,
    pub update_recipient_mode: u8,
    pub cancel_mode: u8,
    pub token_program_flag: u8,
    pub cliff_time: u64,
    pub frequency: u64,
    pub cliff_unlock_amount: u64,
    pub amount_per_period: u64,
    pub number_of_period: u64,
    pub total_claimed_amount: u64,
    pub vesting_start_time: u64,
    pub cancelled_at: u64,
}

/// Parse vesting escrow data from raw account bytes
///
/// Only the length is validated. Anything after the fixed layout is
/// ignored, and every field value is accepted as-is.
pub fn decode_escrow(data: &[u8]) -> Result<EscrowRecord, DecodeError> {
    if data.len() < ESCROW_SIZE {
        return Err(DecodeError::ShortBuffer {
            expected: ESCROW_SIZE,
            actual: data.len(),
        });
    }

    Ok(EscrowRecord {
        recipient: read_pubkey(data, RECIPIENT_OFFSET),
        token_mint: read_pubkey(data, TOKEN_MINT_OFFSET),
        creator: read_pubkey(data, CREATOR_OFFSET),
        base: read_pubkey(data, BASE_OFFSET),
        escrow_bump: data[ESCROW_BUMP_OFFSET],
        update_recipient_mode: data[UPDATE_RECIPIENT_MODE_OFFSET],
        cancel_mode: data[CANCEL_MODE_OFFSET],
        token_program_flag: data[TOKEN_PROGRAM_FLAG_OFFSET],
        cliff_time: read_u64(data, CLIFF_TIME_OFFSET),
        frequency: read_u64(data, FREQUENCY_OFFSET),
        cliff_unlock_amount: read_u64(data, CLIFF_UNLOCK_AMOUNT_OFFSET),
        amount_per_period: read_u64(data, AMOUNT_PER_PERIOD_OFFSET),
        number_of_period: read_u64(data, NUMBER_OF_PERIOD_OFFSET),
        total_claimed_amount: read_u64(data, TOTAL_CLAIMED_AMOUNT_OFFSET),
        vesting_start_time: read_u64(data, VESTING_START_TIME_OFFSET),
        cancelled_at: read_u64(data, CANCELLED_AT_OFFSET),
    })
}

// Callers have already checked the buffer against ESCROW_SIZE.
fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    let mut bytes = [0u8; PUBKEY_LEN];
    bytes.copy_from_slice(&data[offset..offset + PUBKEY_LEN]);
    Pubkey::new_from_array(bytes)
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}
