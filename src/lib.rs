//! lockwatch: reports who holds a token through vesting-lock escrows
//!
//! Scans the lock program's escrow accounts for one mint, computes what
//! is still locked in each, aggregates per recipient and optionally adds
//! each recipient's free wallet balance.

pub mod arguments;
pub mod config;
pub mod constants;
pub mod errors;
pub mod escrow;
pub mod holders;
pub mod logger;
pub mod rpc;
pub mod scanner;
pub mod webserver;
