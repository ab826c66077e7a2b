/// Configuration system for lockwatch
///
/// Sections are declared with `config_struct!` in `schemas`, loaded from
/// TOML plus environment overrides in `utils`, and handed to the rest of
/// the program as a plain `Config` value.
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, EnrichmentConfig, LockConfig, RpcConfig, ScanConfig, WebserverConfig};
pub use utils::{
    apply_env_overrides, load_config, load_config_from_path, load_config_with, resolve_config,
    CONFIG_FILE_PATH,
};
