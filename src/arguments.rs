/// Centralized argument handling for lockwatch
///
/// Binaries store their process arguments here once so the logger and the
/// startup code can check flags without threading `argv` around.
///
/// Features:
/// - CMD_ARGS storage with thread-safe access
/// - Debug flag checks for every log tag
/// - Pure helpers over `&[String]` for testing
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Debug flags understood by the logger, with their help text
pub const DEBUG_FLAGS: &[(&str, &str)] = &[
    ("--debug-config", "Configuration loading debug mode"),
    ("--debug-escrow", "Escrow decoding debug mode"),
    ("--debug-holders", "Holder aggregation and enrichment debug mode"),
    ("--debug-rpc", "RPC requests debug mode"),
    ("--debug-scanner", "Scan orchestration debug mode"),
    ("--debug-system", "System operations debug mode"),
    ("--debug-webserver", "Webserver debug mode"),
];

/// Sets the global command-line arguments
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

pub fn args_contain(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value following `flag`, also accepting `flag=value`
pub fn value_after(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{}=", flag);
    for (i, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value.to_string());
        }
        if arg == flag {
            return args.get(i + 1).filter(|v| !v.starts_with("--")).cloned();
        }
    }
    None
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    args_contain(&get_cmd_args(), arg)
}

/// Gets the value of a command-line argument that follows a flag
pub fn get_arg_value(flag: &str) -> Option<String> {
    value_after(&get_cmd_args(), flag)
}

// =============================================================================
// FLAG CHECKS
// =============================================================================

pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Path passed with `--config`
pub fn config_path() -> Option<String> {
    get_arg_value("--config")
}

/// Enabled debug modes, without the `--debug-` prefix
pub fn enabled_debug_modes(args: &[String]) -> Vec<String> {
    args.iter()
        .filter_map(|a| a.strip_prefix("--debug-"))
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
        .collect()
}

// =============================================================================
// HELP SYSTEM
// =============================================================================

/// Displays the help menu with all available flags and their descriptions
pub fn print_help() {
    println!("lockwatch - vesting lock holder reporting service");
    println!();
    println!("USAGE:");
    println!("    lockwatch [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --config <path>           Config file (default: data/config.toml)");
    println!("    --help, -h                Show this help message");
    println!("    --verbose                 Show verbose output for every tag");
    println!("    --quiet                   Only warnings and errors");
    println!("    --no-log-file             Do not write logs/lockwatch.log");
    println!("    --no-console-log          Do not print log lines to stdout");
    println!();
    println!("DEBUG FLAGS:");
    for (flag, help) in DEBUG_FLAGS {
        println!("    {:<26}{}", flag, help);
    }
    println!();
    println!("ENVIRONMENT:");
    println!("    LOCK_PROGRAM_ID, TOKEN_MINT, RPC_ENDPOINT, ENRICH_FREE_BALANCE,");
    println!("    MAX_CONCURRENT_LOOKUPS, SCAN_DEADLINE_SECS, MINT_FILTER_STRATEGY,");
    println!("    WEBSERVER_HOST, WEBSERVER_PORT");
    println!();
    println!("EXAMPLES:");
    println!("    lockwatch                                   # Serve with data/config.toml");
    println!("    lockwatch --config prod.toml --debug-rpc    # Custom config, RPC debug");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_value_after_flag() {
        let a = args(&["lockwatch", "--config", "custom.toml", "--debug-rpc"]);
        assert_eq!(value_after(&a, "--config"), Some("custom.toml".to_string()));
        assert!(args_contain(&a, "--debug-rpc"));

        let a = args(&["lockwatch", "--config=other.toml"]);
        assert_eq!(value_after(&a, "--config"), Some("other.toml".to_string()));

        let a = args(&["lockwatch", "--config", "--verbose"]);
        assert_eq!(value_after(&a, "--config"), None);
    }

    #[test]
    fn test_enabled_debug_modes() {
        let a = args(&["lockwatch", "--debug-rpc", "--debug-holders", "--verbose", "--debug-"]);
        assert_eq!(enabled_debug_modes(&a), vec!["rpc", "holders"]);
    }

    #[test]
    fn test_global_args_roundtrip() {
        set_cmd_args(args(&["lockwatch", "--debug-scanner", "--config", "x.toml"]));
        assert!(has_arg("--debug-scanner"));
        assert!(!has_arg("--debug-rpc"));
        assert_eq!(config_path(), Some("x.toml".to_string()));
    }
}
