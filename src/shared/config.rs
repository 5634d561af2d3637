// Configuration for the in-memory persistence plugins.
//
// Values come from the environment (a `.env` file is honoured). Every key has a
// default so a test process can run with no configuration at all.

use anyhow::{Context, Result, bail};
use std::str::FromStr;

pub const DEFAULT_JOURNAL_PLUGIN_ID: &str = "inmem-journal";
pub const DEFAULT_SNAPSHOT_PLUGIN_ID: &str = "inmem-snapshot-store";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// What `delete_messages_to` does with the records at or below the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Physically remove the records.
    #[default]
    Truncate,
    /// Acknowledge the delete and keep every record.
    Retain,
}

impl FromStr for DeleteMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "retain" | "noop" => Ok(Self::Retain),
            other => bail!("unknown delete mode '{other}', expected 'truncate' or 'retain'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceConfig {
    pub journal_plugin_id: String,
    pub snapshot_plugin_id: String,
    pub delete_mode: DeleteMode,
    pub log_filter: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            journal_plugin_id: DEFAULT_JOURNAL_PLUGIN_ID.to_string(),
            snapshot_plugin_id: DEFAULT_SNAPSHOT_PLUGIN_ID.to_string(),
            delete_mode: DeleteMode::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl PersistenceConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests need not touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let delete_mode = match lookup("PERSISTENCE_DELETE_MODE") {
            Some(raw) => raw
                .parse::<DeleteMode>()
                .context("invalid PERSISTENCE_DELETE_MODE")?,
            None => defaults.delete_mode,
        };

        let config = Self {
            journal_plugin_id: lookup("PERSISTENCE_JOURNAL_PLUGIN_ID")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.journal_plugin_id),
            snapshot_plugin_id: lookup("PERSISTENCE_SNAPSHOT_PLUGIN_ID")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.snapshot_plugin_id),
            delete_mode,
            log_filter: lookup("PERSISTENCE_LOG_FILTER")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_filter),
        };

        tracing::debug!(
            journal = %config.journal_plugin_id,
            snapshots = %config.snapshot_plugin_id,
            delete_mode = ?config.delete_mode,
            "persistence config loaded"
        );
        Ok(config)
    }
}
