//! Log formatting and output with ANSI colors and text wrapping
//!
//! Console lines look like `12:04:55 [SCANNER   ] [INFO      ] message`.
//! The file sink gets the same content with a full timestamp and no colors.

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 8;
const PREFIX_WIDTH: usize = 9 + (TAG_WIDTH + 3) + (LEVEL_WIDTH + 3);

/// Maximum line length before wrapping
const MAX_LINE_LENGTH: usize = 145;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string().dimmed();
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let tag_plain = tag.to_plain_string();

    let console = super::config::is_console_enabled();
    let chunks = wrap_text(message, MAX_LINE_LENGTH.saturating_sub(PREFIX_WIDTH).max(40));

    for (i, chunk) in chunks.iter().enumerate() {
        if console {
            let console_line = if i == 0 {
                format!(
                    "{} [{}] [{}] {}",
                    time,
                    format_tag(&tag),
                    format_level(level),
                    chunk
                )
            } else {
                format!("{}{}", " ".repeat(PREFIX_WIDTH), chunk)
            };
            print_stdout_safe(&console_line);
        }

        write_to_file(&format!(
            "{} [{}] [{}] {}",
            timestamp,
            tag_plain,
            level.as_str(),
            chunk
        ));
    }
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Rpc => label.bright_cyan().bold(),
        LogTag::Escrow => label.bright_magenta().bold(),
        LogTag::Holders => label.bright_blue().bold(),
        LogTag::Scanner => label.bright_green().bold(),
        LogTag::Webserver => label.green().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Info => label.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => label.dimmed(),
    }
}

/// Print to stdout but ignore broken pipe errors
fn print_stdout_safe(message: &str) {
    let mut out = stdout().lock();
    if let Err(e) = writeln!(out, "{}", message).and_then(|_| out.flush()) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        let _ = writeln!(std::io::stderr(), "Logger stdout error: {}", e);
    }
}

/// Wrap text at word boundaries, respecting existing newlines
///
/// Words longer than `max_width` are split by characters.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for line in text.split('\n') {
        if line.chars().count() <= max_width {
            lines.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        for word in line.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_width) {
                let piece: String = piece.iter().collect();
                let current_len = current.chars().count();
                if current_len == 0 {
                    current = piece;
                } else if current_len + 1 + piece.chars().count() <= max_width {
                    current.push(' ');
                    current.push_str(&piece);
                } else {
                    lines.push(std::mem::replace(&mut current, piece));
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
