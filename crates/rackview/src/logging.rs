//! File logging for the console.
//!
//! The terminal belongs to ratatui, so everything goes to
//! `{data_dir}/rackview.log`. One previous file is kept as `rackview.log.1`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "rackview.log";
/// Size past which the log is moved aside at startup (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

fn previous_log(log_path: &Path) -> PathBuf {
    log_path.with_extension("log.1")
}

/// Move an oversized log to `rackview.log.1`, replacing the one there.
/// Returns whether a rotation happened.
fn rotate_if_oversized(log_path: &Path, max_size: u64) -> io::Result<bool> {
    let size = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if size <= max_size {
        return Ok(false);
    }
    fs::rename(log_path, previous_log(log_path))?;
    Ok(true)
}

/// Filter used when `RUST_LOG` is unset. Panel writes and guard decisions
/// in the core crate only show at debug or trace.
fn default_filter(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    let core = match level.as_str() {
        "debug" | "trace" => level.as_str(),
        _ => "warn",
    };
    format!("rackview={level},rackview_core={core}")
}

/// Initialize logging to a file in the data directory. `RUST_LOG` overrides
/// `level` when set.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE);

    let rotated = rotate_if_oversized(&log_path, MAX_LOG_SIZE).unwrap_or_else(|e| {
        eprintln!("Warning: could not rotate {}: {e}", log_path.display());
        false
    });

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log = %log_path.display(),
        rotated,
        "rackview logging started"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_log_stays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        fs::write(&path, "one\ntwo\n").unwrap();

        assert!(!rotate_if_oversized(&path, 64).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
        assert!(!previous_log(&path).exists());
    }

    #[test]
    fn test_oversized_log_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        fs::write(previous_log(&path), "older").unwrap();
        fs::write(&path, "x".repeat(100)).unwrap();

        assert!(rotate_if_oversized(&path, 64).unwrap());
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(dir.path().join("rackview.log.1")).unwrap().len(), 100);
    }

    #[test]
    fn test_missing_log_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!rotate_if_oversized(&dir.path().join(LOG_FILE), 64).unwrap());
    }

    #[test]
    fn test_core_quiet_unless_debugging() {
        assert_eq!(default_filter("info"), "rackview=info,rackview_core=warn");
        assert_eq!(default_filter("debug"), "rackview=debug,rackview_core=debug");
        assert_eq!(default_filter("TRACE"), "rackview=trace,rackview_core=trace");
    }
}
