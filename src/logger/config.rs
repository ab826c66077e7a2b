/// Logger configuration derived from command-line flags
///
/// Recognized flags:
/// - `--debug-<tag>`: show debug output for one tag
/// - `--verbose-<tag>`: show verbose output for one tag
/// - `--verbose`: show everything
/// - `--quiet`: warnings and errors only
/// - `--no-log-file`: disable the file sink
/// - `--no-console-log`: keep stdout free for program output
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    /// Set by a bare `--verbose`
    pub verbose_all: bool,
    pub debug_tags: HashSet<String>,
    pub verbose_tags: HashSet<String>,
    pub file_logging: bool,
    pub console_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            verbose_all: false,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            file_logging: true,
            console_logging: true,
        }
    }
}

impl LoggerConfig {
    pub fn from_args(args: &[String]) -> Self {
        let mut config = LoggerConfig::default();

        for arg in args {
            if arg == "--verbose" {
                config.verbose_all = true;
            } else if arg == "--no-log-file" {
                config.file_logging = false;
            } else if arg == "--no-console-log" {
                config.console_logging = false;
            } else if let Some(key) = arg.strip_prefix("--debug-") {
                if !key.is_empty() {
                    config.debug_tags.insert(key.to_lowercase());
                }
            } else if let Some(key) = arg.strip_prefix("--verbose-") {
                if !key.is_empty() {
                    config.verbose_tags.insert(key.to_lowercase());
                }
            }
        }

        // Per-tag flags lift the threshold so their messages pass the level check
        if config.verbose_all || !config.verbose_tags.is_empty() {
            config.min_level = config.min_level.max(LogLevel::Verbose);
        } else if !config.debug_tags.is_empty() {
            config.min_level = config.min_level.max(LogLevel::Debug);
        }

        // --quiet wins over everything else
        if args.iter().any(|a| a == "--quiet") {
            config.min_level = LogLevel::Warning;
            config.verbose_all = false;
        }

        config
    }

    pub fn debug_enabled_for(&self, tag: &LogTag) -> bool {
        let key = tag.to_debug_key();
        self.verbose_all
            || self.debug_tags.contains(&key)
            || self.debug_tags.contains("all")
    }

    pub fn verbose_enabled_for(&self, tag: &LogTag) -> bool {
        self.verbose_all || self.verbose_tags.contains(&tag.to_debug_key())
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Configure the logger from the process arguments
pub fn init_from_args() {
    set_logger_config(LoggerConfig::from_args(&crate::arguments::get_cmd_args()));
}

pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

/// Run `f` against the current config without cloning it
pub(super) fn with_logger_config<R>(f: impl FnOnce(&LoggerConfig) -> R) -> Option<R> {
    LOGGER_CONFIG.read().ok().map(|config| f(&*config))
}

pub(super) fn is_console_enabled() -> bool {
    with_logger_config(|config| config.console_logging).unwrap_or(true)
}

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|config| config.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::from_args(&args(&["lockwatch"]));
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.file_logging);
        assert!(!config.debug_enabled_for(&LogTag::Rpc));
    }

    #[test]
    fn test_debug_flags_are_per_tag() {
        let config = LoggerConfig::from_args(&args(&["lockwatch", "--debug-rpc", "--debug-holders"]));
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.debug_enabled_for(&LogTag::Rpc));
        assert!(config.debug_enabled_for(&LogTag::Holders));
        assert!(!config.debug_enabled_for(&LogTag::Scanner));
    }

    #[test]
    fn test_verbose_and_quiet() {
        let verbose = LoggerConfig::from_args(&args(&["lockwatch", "--verbose"]));
        assert_eq!(verbose.min_level, LogLevel::Verbose);
        assert!(verbose.debug_enabled_for(&LogTag::Escrow));

        let quiet = LoggerConfig::from_args(&args(&["lockwatch", "--debug-rpc", "--quiet"]));
        assert_eq!(quiet.min_level, LogLevel::Warning);

        let tagged = LoggerConfig::from_args(&args(&["lockwatch", "--verbose-scanner", "--no-log-file"]));
        assert!(tagged.verbose_enabled_for(&LogTag::Scanner));
        assert!(!tagged.verbose_enabled_for(&LogTag::Rpc));
        assert!(!tagged.file_logging);
        assert!(tagged.console_logging);

        let silent = LoggerConfig::from_args(&args(&["tool_lock_report", "--no-console-log"]));
        assert!(!silent.console_logging);
    }
}
