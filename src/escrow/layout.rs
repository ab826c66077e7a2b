//! Byte layout of a vesting escrow account
//!
//! Offsets are absolute from the start of the account data. Every integer
//! is little-endian.

pub const RECIPIENT_OFFSET: usize = 0;
pub const TOKEN_MINT_OFFSET: usize = 32;
pub const CREATOR_OFFSET: usize = 64;
pub const BASE_OFFSET: usize = 96;

pub const ESCROW_BUMP_OFFSET: usize = 128;
pub const UPDATE_RECIPIENT_MODE_OFFSET: usize = 129;
pub const CANCEL_MODE_OFFSET: usize = 130;
pub const TOKEN_PROGRAM_FLAG_OFFSET: usize = 131;

/// 4 bytes of alignment padding
pub const PADDING0_OFFSET: usize = 132;

pub const CLIFF_TIME_OFFSET: usize = 136;
pub const FREQUENCY_OFFSET: usize = 144;
pub const CLIFF_UNLOCK_AMOUNT_OFFSET: usize = 152;
pub const AMOUNT_PER_PERIOD_OFFSET: usize = 160;
pub const NUMBER_OF_PERIOD_OFFSET: usize = 168;
pub const TOTAL_CLAIMED_AMOUNT_OFFSET: usize = 176;
pub const VESTING_START_TIME_OFFSET: usize = 184;
pub const CANCELLED_AT_OFFSET: usize = 192;

/// 8 bytes of padding followed by 5 reserved u128 slots
pub const PADDING1_OFFSET: usize = 200;
pub const RESERVED_OFFSET: usize = 208;
pub const RESERVED_LEN: usize = 16 * 5;

pub const PUBKEY_LEN: usize = 32;

/// Fixed on-wire size of an escrow record
pub const ESCROW_SIZE: usize = RESERVED_OFFSET + RESERVED_LEN;

const _: () = assert!(ESCROW_SIZE == 288);
