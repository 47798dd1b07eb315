//! Configuration parsing for the feed handler.
//!
//! All modules read their settings from a single JSON config file. The
//! top-level structure contains logging metadata and a `feeds` array where
//! each entry describes one feed module instance.
//!
//! # Example config
//!
//! ```json
//! {
//!   "module": { "module_name": "bats_md", "log_path": "/tmp/log" },
//!   "feeds": [{
//!     "source": "file",
//!     "path": "/data/pitch_example_data",
//!     "top_n": 10
//!   }, {
//!     "source": "udp",
//!     "ip": "0.0.0.0",
//!     "port": 30001,
//!     "sequenced": true,
//!     "symbols": ["SPY", "QQQ"]
//!   }]
//! }
//! ```

use serde::Deserialize;

use crate::error::BatsError;

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Module metadata (name, log path).
    pub module: Option<ModuleMeta>,

    /// Array of feed configs — one per feed module instance.
    pub feeds: Vec<FeedConfig>,
}

/// Module metadata block.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleMeta {
    pub module_name: Option<String>,
    pub log_path: Option<String>,
}

impl AppConfig {
    /// Returns the module name, defaulting to `"bats_md"`.
    pub fn module_name(&self) -> String {
        self.module
            .as_ref()
            .and_then(|m| m.module_name.clone())
            .unwrap_or_else(|| "bats_md".to_string())
    }

    /// Returns the log path, if configured.
    pub fn log_path(&self) -> Option<String> {
        self.module.as_ref().and_then(|m| m.log_path.clone())
    }
}

/// A single feed configuration.
///
/// Each feed maps to one source (a replay file or a UDP listen address) and
/// one book/stats worker.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Source kind: `"file"` or `"udp"`.
    pub source: String,

    /// Optional label for log lines (defaults to the source kind).
    pub label: Option<String>,

    /// Replay file path (`file` source only).
    pub path: Option<String>,

    /// UDP bind address (`udp` source only).
    pub ip: Option<String>,
    pub port: Option<u16>,

    /// Whether UDP records carry an 8-digit decimal sequence prefix.
    pub sequenced: Option<bool>,

    /// Optional symbol whitelist; records for other symbols are dropped
    /// before reaching the book.
    pub symbols: Option<Vec<String>>,

    /// Bounded channel capacity between source and book worker.
    pub channel_capacity: Option<usize>,

    /// Interval between periodic stats log lines, in seconds.
    pub stats_interval_sec: Option<u64>,

    /// Number of symbols in the final top-volume report.
    pub top_n: Option<usize>,

    /// CPU core to pin the book worker thread to.
    pub cpu_affinity_book: Option<i32>,
}

impl FeedConfig {
    /// Returns the effective channel capacity (default: 8192).
    pub fn effective_capacity(&self) -> usize {
        self.channel_capacity.unwrap_or(8192)
    }

    /// Returns the effective top-N report size (default: 10).
    pub fn effective_top_n(&self) -> usize {
        self.top_n.unwrap_or(10)
    }

    /// Returns the effective stats interval in seconds (default: 10).
    pub fn effective_stats_interval(&self) -> u64 {
        self.stats_interval_sec.unwrap_or(10)
    }

    /// Returns whether the feed carries sequence prefixes.
    pub fn is_sequenced(&self) -> bool {
        self.sequenced.unwrap_or(false)
    }

    /// Returns the label for log lines.
    pub fn effective_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.source.clone())
    }
}

/// Load and parse a JSON config file.
///
/// Read failures surface as [`BatsError::Io`], malformed JSON as
/// [`BatsError::Config`].
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(BatsError::Io)?;
    let config: AppConfig = serde_json::from_str(&content)
        .map_err(|e| BatsError::Config(format!("{}: {e}", path.display())))?;
    Ok(config)
}
