//! Application logging.
//!
//! Log lines are kept in memory for the logs dialog (`G`). When file logging
//! is enabled in the configuration, the same lines and every `log` crate
//! record are also written through a `fern` dispatch to
//! `<data_local_dir>/indexadmin/indexadmin.log`.

use anyhow::{Context, Result};
use chrono::Utc;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Only one global `log` dispatch can exist per process.
static FILE_DISPATCH: OnceCell<PathBuf> = OnceCell::new();

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            log_file: None,
        }
    }

    /// Create a logger honoring the `logging.enabled` configuration flag
    pub fn from_config(enabled: bool) -> Result<Self> {
        let mut logger = Self::new();
        if enabled {
            let path = FILE_DISPATCH.get_or_try_init(|| {
                let path = Self::get_log_file_path()?;
                Self::install_file_dispatch(&path)?;
                Ok::<_, anyhow::Error>(path)
            })?;
            logger.log_file = Some(path.clone());
        }
        Ok(logger)
    }

    fn install_file_dispatch(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(log::LevelFilter::Debug)
            .level_for("hyper_util", log::LevelFilter::Warn)
            .level_for("reqwest", log::LevelFilter::Info)
            .chain(fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?)
            .apply()
            .context("Failed to install log dispatcher")?;

        Ok(())
    }

    /// Path of the log file written when file logging is enabled
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))
            .map(|dir| dir.join("indexadmin").join("indexadmin.log"))
    }

    pub fn is_enabled(&self) -> bool {
        self.log_file.is_some()
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if self.is_enabled() {
            log::info!("{}", message);
        }

        if let Ok(mut logs) = self.logs.lock() {
            logs.push(formatted_message);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
