//! Record stream producer
//!
//! Pumps lines from the inspector's stdout into a bounded channel, dropping
//! undefined-symbol records on the way. The sender is owned by the reader
//! thread, so the channel closes exactly once: when the thread returns.

use std::io::{self, BufRead, BufReader, Read};
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use super::record::is_undefined_line;

/// Line counts observed by the reader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProducerStats {
    /// Lines published to the channel
    pub forwarded: usize,
    /// `U` lines dropped
    pub undefined: usize,
}

/// Read `reader` to the end, publishing every defined-symbol line on `tx`.
///
/// Stops early on a read error or when the receiving side hangs up. Lines
/// are decoded lossily; symbol names are expected to be ASCII.
pub fn pump_lines<R: BufRead>(mut reader: R, tx: SyncSender<String>) -> ProducerStats {
    let mut stats = ProducerStats::default();
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("read error on inspector output: {}", e);
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        if is_undefined_line(&line) {
            stats.undefined += 1;
            continue;
        }

        if tx.send(line.into_owned()).is_err() {
            debug!("aggregator hung up, stopping reader");
            break;
        }
        stats.forwarded += 1;
    }

    debug!(
        "inspector output ended: {} lines forwarded, {} undefined skipped",
        stats.forwarded, stats.undefined
    );
    stats
}

/// Spawn the reader thread over a raw output stream
pub fn spawn_reader<R>(source: R, tx: SyncSender<String>) -> io::Result<JoinHandle<ProducerStats>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("nm-reader".to_string())
        .spawn(move || pump_lines(BufReader::new(source), tx))
}
