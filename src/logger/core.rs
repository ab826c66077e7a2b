/// Core logging implementation with automatic filtering
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Anything above the minimum level threshold is dropped
/// 3. Debug level requires --debug-<tag> for that tag
/// 4. Verbose level requires --verbose or --verbose-<tag>
use super::config::{with_logger_config, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log_with(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    match level {
        LogLevel::Debug => config.debug_enabled_for(tag),
        LogLevel::Verbose => config.verbose_enabled_for(tag),
        _ => true,
    }
}

pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    with_logger_config(|config| should_log_with(config, tag, level))
        .unwrap_or_else(|| should_log_with(&LoggerConfig::default(), tag, level))
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }
    super::format::format_and_log(tag, level, message);
}
