//! Module registry — factory for creating feed modules from config.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use bats_core::config::FeedConfig;

use crate::pipeline::{FeedDef, FeedSource, GenericFeed};
use crate::FeedModule;

/// Create a [`FeedModule`] based on the `source` field in the config.
pub fn create_feed_module(config: &FeedConfig) -> Result<Box<dyn FeedModule>> {
    let source = match config.source.to_lowercase().as_str() {
        "file" => {
            let path = config
                .path
                .as_ref()
                .ok_or_else(|| anyhow!("file feed requires 'path'"))?;
            FeedSource::File {
                path: PathBuf::from(path),
            }
        }
        "udp" => {
            let ip = config
                .ip
                .as_ref()
                .ok_or_else(|| anyhow!("udp feed requires 'ip'"))?;
            let port = config
                .port
                .ok_or_else(|| anyhow!("udp feed requires 'port'"))?;
            FeedSource::Udp {
                bind_addr: format!("{ip}:{port}"),
            }
        }
        other => return Err(anyhow!("unknown feed source: {other}")),
    };

    let def = FeedDef {
        label: config.effective_label(),
        source,
        symbols: config.symbols.clone(),
        sequenced: config.is_sequenced(),
        channel_capacity: config.effective_capacity(),
        stats_interval: Duration::from_secs(config.effective_stats_interval()),
        top_n: config.effective_top_n(),
        book_cpu_core: config.cpu_affinity_book,
    };

    Ok(Box::new(GenericFeed::new(def)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(source: &str) -> FeedConfig {
        serde_json::from_str(&format!(r#"{{ "source": "{source}" }}"#)).unwrap()
    }

    #[test]
    fn file_feed_requires_path() {
        assert!(create_feed_module(&base_config("file")).is_err());

        let mut cfg = base_config("file");
        cfg.path = Some("/data/pitch".to_string());
        let module = create_feed_module(&cfg).unwrap();
        assert_eq!(module.name(), "file");
    }

    #[test]
    fn udp_feed_requires_addr() {
        assert!(create_feed_module(&base_config("udp")).is_err());

        let mut cfg = base_config("udp");
        cfg.ip = Some("0.0.0.0".to_string());
        cfg.port = Some(30001);
        cfg.label = Some("pitch_udp".to_string());
        let module = create_feed_module(&cfg).unwrap();
        assert_eq!(module.name(), "pitch_udp");
    }

    #[test]
    fn unknown_source_is_rejected() {
        assert!(create_feed_module(&base_config("websocket")).is_err());
    }
}
