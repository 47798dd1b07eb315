//! # bats-md
//!
//! PITCH market-data feed handling.
//!
//! ## Architecture
//!
//! The [`registry`] turns each config entry into a [`pipeline::GenericFeed`]:
//! a source task (file replay or UDP receive) decodes records through the
//! [`pitch`] factory and pushes them over a bounded channel to a dedicated
//! book thread ([`worker`]) that tracks sequencing, execution volume, and
//! message statistics.
//!
//! ## Modules
//!
//! - [`pitch`] — record parsers + type-code dispatch factory
//! - [`seq`] — sequence gap / duplicate tracking
//! - [`book`] — open-order tracking and executed-volume tally
//! - [`stats`] — per-type message counters
//! - [`pipeline`] — `FeedDef` + `GenericFeed` engine
//! - [`source`] — file and UDP feed sources
//! - [`worker`] — the book loop
//! - [`registry`] — config-to-module factory

pub mod book;
pub mod pipeline;
pub mod pitch;
pub mod registry;
pub mod seq;
pub mod source;
pub mod stats;
pub mod worker;

use anyhow::Result;
use async_trait::async_trait;

/// Trait implemented by all feed modules.
///
/// Only `Send` is required (not `Sync`) because modules are accessed
/// sequentially by the runner, never concurrently.
#[async_trait]
pub trait FeedModule: Send {
    /// Human-readable module name.
    fn name(&self) -> &str;
    /// Connect the source and begin processing records.
    async fn start(&mut self) -> Result<()>;
    /// Stop all tasks.
    async fn stop(&mut self) -> Result<()>;
}
