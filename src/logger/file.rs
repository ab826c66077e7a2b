//! Plain-text log file sink
//!
//! Lines are appended to `logs/lockwatch.log` through a buffered writer.
//! Failures to open or write the file never interrupt console logging.

use once_cell::sync::Lazy;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_NAME: &str = "lockwatch.log";

static LOG_WRITER: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Open the default log file
pub fn init_file_logging() {
    let path = Path::new(LOG_DIR).join(LOG_FILE_NAME);
    if let Err(e) = init_file_logging_at(&path) {
        eprintln!("Failed to open log file {}: {}", path.display(), e);
    }
}

pub fn init_file_logging_at(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    if let Ok(mut writer) = LOG_WRITER.lock() {
        if let Some(previous) = writer.as_mut() {
            let _ = previous.flush();
        }
        *writer = Some(BufWriter::new(file));
    }
    Ok(())
}

/// Append one line, a no-op until the sink is initialized
pub fn write_to_file(line: &str) {
    if let Ok(mut writer) = LOG_WRITER.lock() {
        if let Some(w) = writer.as_mut() {
            let _ = writeln!(w, "{}", line);
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut writer) = LOG_WRITER.lock() {
        if let Some(w) = writer.as_mut() {
            let _ = w.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_reach_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("test.log");

        init_file_logging_at(&path).unwrap();
        write_to_file("first line");
        write_to_file("second line");
        flush_file_logging();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("first line"));
        assert!(contents.contains("second line"));
    }
}
