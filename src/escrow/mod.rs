/// Vesting escrow records
///
/// Decoding of the fixed 288-byte escrow layout, the token-mint filter and
/// the vesting schedule math. Everything here is pure and synchronous so it
/// can run on the rayon pool.
pub mod decoder;
pub mod filter;
pub mod layout;
pub mod vesting;

#[cfg(test)]
pub(crate) mod fixtures;

pub use decoder::{decode_escrow, EscrowRecord};
pub use filter::{build_query, matches, MintFilterStrategy};
pub use layout::ESCROW_SIZE;
pub use vesting::{compute_breakdown, total_vesting, VestingBreakdown};
