/// Configuration schemas - every config section defined once with defaults
///
/// Each struct is defined using the config_struct! macro, so a TOML file only
/// needs the keys it wants to change.
use crate::config_struct;
use crate::constants::{
    DEFAULT_LOCK_PROGRAM_ID, DEFAULT_MAX_CONCURRENT_LOOKUPS, DEFAULT_RPC_ENDPOINT,
    DEFAULT_SCAN_DEADLINE_SECS, DEFAULT_TOKEN_MINT, MAX_CONCURRENT_LOOKUPS_CEILING,
};
use crate::escrow::MintFilterStrategy;
use crate::rpc::utils::parse_pubkey_string;
use solana_sdk::pubkey::Pubkey;

// ============================================================================
// LOCK PROGRAM
// ============================================================================

config_struct! {
    /// Which program to scan and which token to report
    pub struct LockConfig {
        /// Vesting lock program id (base58)
        program_id: String = DEFAULT_LOCK_PROGRAM_ID.to_string(),
        /// Token mint the report is filtered to (base58)
        token_mint: String = DEFAULT_TOKEN_MINT.to_string(),
    }
}

// ============================================================================
// RPC
// ============================================================================

config_struct! {
    /// Ledger RPC endpoint configuration
    pub struct RpcConfig {
        url: String = DEFAULT_RPC_ENDPOINT.to_string(),
        /// Per-request HTTP timeout
        timeout_secs: u64 = 30,
        commitment: String = "confirmed".to_string(),
    }
}

// ============================================================================
// SCAN
// ============================================================================

config_struct! {
    pub struct ScanConfig {
        /// Upper bound for one full scan including enrichment
        deadline_secs: u64 = DEFAULT_SCAN_DEADLINE_SECS,
        mint_filter_strategy: MintFilterStrategy = MintFilterStrategy::QueryPredicate,
        /// Request only the 288 escrow bytes of each account
        use_data_slice: bool = true,
    }
}

// ============================================================================
// ENRICHMENT
// ============================================================================

config_struct! {
    /// Free-balance enrichment defaults
    pub struct EnrichmentConfig {
        /// Default mode when a request does not choose one
        enabled: bool = false,
        max_concurrent_lookups: usize = DEFAULT_MAX_CONCURRENT_LOOKUPS,
    }
}

// ============================================================================
// WEBSERVER
// ============================================================================

config_struct! {
    pub struct WebserverConfig {
        host: String = "127.0.0.1".to_string(),
        port: u16 = 8080,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sections
    pub struct Config {
        lock: LockConfig = LockConfig::default(),
        rpc: RpcConfig = RpcConfig::default(),
        scan: ScanConfig = ScanConfig::default(),
        enrichment: EnrichmentConfig = EnrichmentConfig::default(),
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl LockConfig {
    pub fn program_pubkey(&self) -> Result<Pubkey, String> {
        parse_pubkey_string(&self.program_id)
            .map_err(|e| format!("lock.program_id is invalid: {}", e))
    }

    pub fn mint_pubkey(&self) -> Result<Pubkey, String> {
        parse_pubkey_string(&self.token_mint)
            .map_err(|e| format!("lock.token_mint is invalid: {}", e))
    }
}

impl WebserverConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }
        Ok(())
    }

    /// Get the full bind address (host:port)
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Check every value that cannot be expressed by the type alone
    pub fn validate(&self) -> Result<(), String> {
        self.lock.program_pubkey()?;
        self.lock.mint_pubkey()?;

        if !(self.rpc.url.starts_with("http://") || self.rpc.url.starts_with("https://")) {
            return Err(format!("rpc.url must be an http(s) URL, got '{}'", self.rpc.url));
        }
        if self.rpc.timeout_secs == 0 {
            return Err("rpc.timeout_secs must be > 0".to_string());
        }
        if self.scan.deadline_secs == 0 {
            return Err("scan.deadline_secs must be > 0".to_string());
        }
        if self.enrichment.max_concurrent_lookups == 0
            || self.enrichment.max_concurrent_lookups > MAX_CONCURRENT_LOOKUPS_CEILING
        {
            return Err(format!(
                "enrichment.max_concurrent_lookups must be between 1 and {}",
                MAX_CONCURRENT_LOOKUPS_CEILING
            ));
        }

        self.webserver.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rpc.commitment, "confirmed");
        assert_eq!(config.scan.deadline_secs, 30);
        assert_eq!(config.scan.mint_filter_strategy, MintFilterStrategy::QueryPredicate);
        assert!(!config.enrichment.enabled);
        assert_eq!(config.enrichment.max_concurrent_lookups, 8);
        assert_eq!(config.webserver.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scan]
            mint_filter_strategy = "post-decode"

            [enrichment]
            enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(config.scan.mint_filter_strategy, MintFilterStrategy::PostDecode);
        assert!(config.scan.use_data_slice);
        assert!(config.enrichment.enabled);
        assert_eq!(config.lock.program_id, DEFAULT_LOCK_PROGRAM_ID);
    }

    #[test]
    fn test_invalid_ids_rejected() {
        let mut config = Config::default();
        config.lock.token_mint = "not-a-key".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("token_mint"));

        let mut config = Config::default();
        config.lock.program_id = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_limits_rejected() {
        let mut config = Config::default();
        config.enrichment.max_concurrent_lookups = 65;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.rpc.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.webserver.port = 0;
        assert!(config.validate().is_err());
    }
}
