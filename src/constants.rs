/// Global constants used across lockwatch
///
/// This module contains system-wide constants that are not configurable
/// and are used across multiple modules.

// ============================================================================
// LOCK PROGRAM DEFAULTS
// ============================================================================

/// Token vesting lock program scanned when no program id is configured
pub const DEFAULT_LOCK_PROGRAM_ID: &str = "LocpQgucEQHbqNABEYvBvwoxCPsSbG91A1QaQhQQqjn";

/// Token mint reported when no mint is configured
pub const DEFAULT_TOKEN_MINT: &str = "8vGr1eX9vfpootWiUPYa5kYoGx9bTuRy2Xc4dNMrpump";

/// Public mainnet RPC endpoint
pub const DEFAULT_RPC_ENDPOINT: &str = "https://api.mainnet-beta.solana.com";

// ============================================================================
// TOKEN ACCOUNT LAYOUT
// ============================================================================

/// Offset of the u64 amount field inside an SPL / Token-2022 token account
pub const TOKEN_ACCOUNT_AMOUNT_OFFSET: usize = 64;

/// Minimum token account length that still contains the amount field
pub const TOKEN_ACCOUNT_MIN_LEN: usize = TOKEN_ACCOUNT_AMOUNT_OFFSET + 8;

// ============================================================================
// ENRICHMENT LIMITS
// ============================================================================

/// Default number of concurrent free-balance lookups
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

/// Upper bound for concurrent free-balance lookups
pub const MAX_CONCURRENT_LOOKUPS_CEILING: usize = 64;

/// Default deadline for a full scan in seconds
pub const DEFAULT_SCAN_DEADLINE_SECS: u64 = 30;
