//! Escrow account builders shared by unit tests

use super::layout::*;
use crate::rpc::ProgramAccount;
use solana_sdk::pubkey::Pubkey;
use std::sync::atomic::{AtomicU64, Ordering};

/// Distinct pubkeys without relying on a random source
pub fn unique_pubkey() -> Pubkey {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&n.to_le_bytes());
    bytes[31] = 0x5A;
    Pubkey::new_from_array(bytes)
}

pub struct EscrowBuilder {
    data: Vec<u8>,
}

impl EscrowBuilder {
    pub fn new(recipient: Pubkey, mint: Pubkey) -> Self {
        let mut builder = Self {
            data: vec![0u8; ESCROW_SIZE],
        };
        builder.put_pubkey(RECIPIENT_OFFSET, &recipient);
        builder.put_pubkey(TOKEN_MINT_OFFSET, &mint);
        builder
    }

    /// Shorthand for the common schedule fields
    pub fn schedule(recipient: Pubkey, mint: Pubkey, cliff: u64, per: u64, n: u64, claimed: u64) -> Self {
        Self::new(recipient, mint)
            .cliff_unlock_amount(cliff)
            .amount_per_period(per)
            .number_of_period(n)
            .total_claimed_amount(claimed)
    }

    fn put_pubkey(&mut self, offset: usize, key: &Pubkey) {
        self.data[offset..offset + PUBKEY_LEN].copy_from_slice(key.as_ref());
    }

    fn put_u64(mut self, offset: usize, value: u64) -> Self {
        self.data[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
        self
    }

    pub fn creator(mut self, key: Pubkey) -> Self {
        self.put_pubkey(CREATOR_OFFSET, &key);
        self
    }

    pub fn base(mut self, key: Pubkey) -> Self {
        self.put_pubkey(BASE_OFFSET, &key);
        self
    }

    pub fn cliff_time(self, v: u64) -> Self {
        self.put_u64(CLIFF_TIME_OFFSET, v)
    }

    pub fn frequency(self, v: u64) -> Self {
        self.put_u64(FREQUENCY_OFFSET, v)
    }

    pub fn cliff_unlock_amount(self, v: u64) -> Self {
        self.put_u64(CLIFF_UNLOCK_AMOUNT_OFFSET, v)
    }

    pub fn amount_per_period(self, v: u64) -> Self {
        self.put_u64(AMOUNT_PER_PERIOD_OFFSET, v)
    }

    pub fn number_of_period(self, v: u64) -> Self {
        self.put_u64(NUMBER_OF_PERIOD_OFFSET, v)
    }

    pub fn total_claimed_amount(self, v: u64) -> Self {
        self.put_u64(TOTAL_CLAIMED_AMOUNT_OFFSET, v)
    }

    pub fn vesting_start_time(self, v: u64) -> Self {
        self.put_u64(VESTING_START_TIME_OFFSET, v)
    }

    pub fn cancelled_at(self, v: u64) -> Self {
        self.put_u64(CANCELLED_AT_OFFSET, v)
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }

    /// Account whose data stops after `len` bytes
    pub fn truncated(mut self, len: usize) -> ProgramAccount {
        self.data.truncate(len);
        self.account()
    }

    pub fn account(self) -> ProgramAccount {
        ProgramAccount {
            pubkey: unique_pubkey(),
            data: self.data,
        }
    }
}
