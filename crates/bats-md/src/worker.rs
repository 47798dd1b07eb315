//! The book loop — one dedicated thread per feed.
//!
//! Receives [`FeedEvent`]s from the pipeline channel, applies sequence
//! checking and the symbol filter, and updates the volume book and stats.
//! When the channel closes (source drained or aborted) the final stats and
//! top-volume report are logged.

use std::time::{Duration, Instant};

use ahash::AHashSet;
use bats_core::{cpu_affinity, time_util};
use crossbeam_channel::Receiver;
use tracing::{debug, info, warn};

use crate::book::VolumeBook;
use crate::pipeline::FeedEvent;
use crate::seq::{SeqCheck, SeqTracker};
use crate::stats::MsgStats;

/// Run a book loop on the calling thread.
///
/// If `cpu_core` is `Some`, the thread is pinned to that CPU core before
/// entering the hot loop. `filter`, when present, drops symbol-bearing
/// messages for other symbols; order-referencing messages (`E`, `X`, `B`)
/// always pass and resolve through the book, which ignores orders it never
/// saw.
pub fn run_book_loop(
    label: &str,
    rx: Receiver<FeedEvent>,
    filter: Option<AHashSet<String>>,
    stats_interval: Duration,
    top_n: usize,
    cpu_core: Option<i32>,
) {
    cpu_affinity::maybe_bind(cpu_core);

    let mut book = VolumeBook::new();
    let mut stats = MsgStats::new();
    let mut tracker = SeqTracker::new();
    let mut last_report = Instant::now();

    // Anchor for converting feed timestamps (ms since midnight) to Unix time,
    // used to report how far the book clock trails the wall clock.
    let midnight = time_util::midnight_ms(time_util::now_ms());
    let mut last_feed_ms: Option<u64> = None;

    info!("[{label}] book loop started");

    while let Ok(event) = rx.recv() {
        match event {
            FeedEvent::ParseError { seq, error } => {
                stats.record_parse_error();
                debug!("[{label}] parse error (seq={seq:?}): {error}");
            }
            FeedEvent::Msg { seq, msg } => {
                if let Some(n) = seq {
                    match tracker.observe(n) {
                        SeqCheck::InOrder => {}
                        SeqCheck::Gap { expected, got } => {
                            stats.record_gap(got - expected);
                            warn!("[{label}] sequence gap: expected {expected}, got {got}");
                        }
                        SeqCheck::Duplicate => {
                            stats.record_duplicate();
                            continue;
                        }
                    }
                }

                if let Some(ref allowed) = filter
                    && let Some(sym) = msg.symbol()
                    && !allowed.contains(sym)
                {
                    stats.record_filtered();
                    continue;
                }

                last_feed_ms =
                    Some(time_util::feed_ts_to_unix_ms(msg.timestamp_ms(), midnight));
                stats.record(&msg);
                book.apply(&msg);
            }
        }

        if last_report.elapsed() >= stats_interval {
            match last_feed_ms {
                Some(t) => {
                    let lag_ms = time_util::now_ms().saturating_sub(t);
                    info!("[{label}] {stats} lag={lag_ms}ms");
                }
                None => info!("[{label}] {stats}"),
            }
            last_report = Instant::now();
        }
    }

    info!("[{label}] feed drained — {stats}");
    if book.unknown_orders() > 0 || book.unknown_breaks() > 0 {
        debug!(
            "[{label}] unknown order refs: {} execs/cancels, {} breaks",
            book.unknown_orders(),
            book.unknown_breaks()
        );
    }
    for (rank, (symbol, volume)) in book.top_n(top_n).iter().enumerate() {
        info!("[{label}] volume[{rank}] {symbol} {volume}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::BatsMsgFactory;

    fn msg(record: &str) -> FeedEvent {
        FeedEvent::Msg {
            seq: None,
            msg: BatsMsgFactory::parse(record).unwrap(),
        }
    }

    #[test]
    fn loop_drains_and_exits() {
        let (tx, rx) = crossbeam_channel::bounded(16);
        tx.send(msg("28800011AAK27GA0000DTS000100SH    0000619200Y"))
            .unwrap();
        tx.send(msg("28800168EAK27GA0000DT00005000001AAA23BC")).unwrap();
        drop(tx);

        // Must return once the channel is closed.
        run_book_loop("test", rx, None, Duration::from_secs(3600), 10, None);
    }

    #[test]
    fn loop_applies_filter() {
        let (tx, rx) = crossbeam_channel::bounded(16);
        tx.send(msg("28800011AAK27GA0000DTS000100SH    0000619200Y"))
            .unwrap();
        drop(tx);

        let filter: AHashSet<String> = ["SPY".to_string()].into_iter().collect();
        run_book_loop("test", rx, Some(filter), Duration::from_secs(3600), 10, None);
    }
}
