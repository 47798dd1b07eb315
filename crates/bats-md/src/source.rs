//! Feed sources — file replay and UDP receive.
//!
//! Both sources decode each raw record through the factory and push
//! [`FeedEvent`]s into the pipeline channel. Decode failures are forwarded as
//! events rather than dropped so the book thread keeps the error counters.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bats_core::{time_util, BatsError};
use crossbeam_channel::Sender;
use tokio::net::UdpSocket;
use tracing::{error, info, warn};

use crate::pipeline::FeedEvent;
use crate::pitch::BatsMsgFactory;

/// Width of the decimal sequence prefix on sequenced UDP records.
const SEQ_PREFIX_LEN: usize = 8;

// ---------------------------------------------------------------------------
// File replay
// ---------------------------------------------------------------------------

/// Replay a capture file, one record per line, into the pipeline channel.
///
/// Runs to EOF and then drops `tx`, which lets the book thread drain and
/// print its final report. Returns early if the book thread is gone.
pub fn run_file_replay(path: &Path, tx: Sender<FeedEvent>, label: &str) {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            error!("[{label}] cannot open {}: {e}", path.display());
            return;
        }
    };

    info!("[{label}] replaying {}", path.display());
    let start_us = time_util::now_us();
    let mut records = 0u64;

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("[{label}] read error after {records} records: {e}");
                break;
            }
        };
        let record = line.trim_end_matches('\r');
        if record.is_empty() {
            continue;
        }

        let event = match BatsMsgFactory::parse(record) {
            Ok(msg) => FeedEvent::Msg { seq: None, msg },
            Err(error) => FeedEvent::ParseError { seq: None, error },
        };
        if tx.send(event).is_err() {
            // Book thread is gone; nothing left to feed.
            return;
        }
        records += 1;
    }

    let elapsed_ms = (time_util::now_us() - start_us) / 1_000;
    info!("[{label}] replay complete ({records} records in {elapsed_ms}ms)");
}

// ---------------------------------------------------------------------------
// UDP receive
// ---------------------------------------------------------------------------

/// Receive newline-delimited records over UDP and push them into the
/// pipeline channel. Runs until aborted or the book thread is gone.
///
/// With `sequenced`, every record carries an 8-digit decimal sequence prefix
/// which is stripped before decoding and handed to the book thread for gap
/// tracking.
pub async fn run_udp_source(bind_addr: &str, sequenced: bool, tx: Sender<FeedEvent>, label: &str) {
    let sock = match UdpSocket::bind(bind_addr).await {
        Ok(s) => s,
        Err(e) => {
            error!("[{label}] cannot bind {bind_addr}: {e}");
            return;
        }
    };
    info!("[{label}] listening on {bind_addr}");

    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let len = match sock.recv_from(&mut buf).await {
            Ok((len, _peer)) => len,
            Err(e) => {
                error!("[{label}] recv error: {e}");
                return;
            }
        };
        let Ok(text) = std::str::from_utf8(&buf[..len]) else {
            warn!("[{label}] dropping non-UTF8 datagram ({len} bytes)");
            continue;
        };

        for record in text.lines() {
            let record = record.trim_end_matches('\r');
            if record.is_empty() {
                continue;
            }
            let event = match split_record(record, sequenced) {
                Ok((seq, body)) => match BatsMsgFactory::parse(body) {
                    Ok(msg) => FeedEvent::Msg { seq, msg },
                    Err(error) => FeedEvent::ParseError { seq, error },
                },
                Err(error) => FeedEvent::ParseError { seq: None, error },
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    }
}

/// Split an optional sequence prefix off a raw record.
fn split_record(record: &str, sequenced: bool) -> Result<(Option<u64>, &str), BatsError> {
    if !sequenced {
        return Ok((None, record));
    }
    let bytes = record.as_bytes();
    if bytes.len() < SEQ_PREFIX_LEN || !bytes[..SEQ_PREFIX_LEN].iter().all(u8::is_ascii_digit) {
        return Err(BatsError::Sequence(format!(
            "missing sequence prefix on record '{}'",
            record.get(..16).unwrap_or(record)
        )));
    }
    let (prefix, body) = record.split_at(SEQ_PREFIX_LEN);
    let seq = prefix
        .parse::<u64>()
        .map_err(|e| BatsError::Sequence(e.to_string()))?;
    Ok((Some(seq), body))
}
