//! Per-package size aggregation
//!
//! The [`Aggregator`] owns the accumulation map for the whole run. It is only
//! reachable through consuming entry points ([`Aggregator::drain`],
//! [`Aggregator::spawn`], [`Aggregator::from_lines`]), so no other thread can
//! touch the totals while they are being built. The result is an immutable
//! [`SizeTable`].

use std::collections::HashMap;
use std::io;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use log::warn;
use serde::Serialize;

use super::keyfold::fold_key;
use super::record::{parse_record, RecordError};
use crate::config::GroupingLevel;

/// Counters describing how the input was consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    /// Records whose size was added
    pub records: usize,
    /// Lines with too few fields
    pub malformed: usize,
    /// Records whose size did not parse
    pub invalid_sizes: usize,
    /// Undefined (`U`) records that reached the aggregator and were ignored
    pub undefined: usize,
}

/// Single-owner accumulator of package sizes
#[derive(Debug)]
pub struct Aggregator {
    level: GroupingLevel,
    totals: HashMap<String, u64>,
    stats: AggregateStats,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new(level: GroupingLevel) -> Self {
        Self {
            level,
            totals: HashMap::new(),
            stats: AggregateStats::default(),
        }
    }

    /// Aggregate an in-memory sequence of lines
    ///
    /// # Examples
    ///
    /// ```
    /// use gosize::analyzer::Aggregator;
    /// use gosize::config::GroupingLevel;
    ///
    /// let table = Aggregator::from_lines(
    ///     GroupingLevel::default(),
    ///     ["16b9450 16 R crypto.statictmp_0", "113b3e0 208 T crypto/cipher.xorBytes"],
    /// );
    /// assert_eq!(table.get("crypto"), Some(224));
    /// ```
    pub fn from_lines<I, S>(level: GroupingLevel, lines: I) -> SizeTable
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut aggregator = Self::new(level);
        for line in lines {
            aggregator.ingest(line.as_ref());
        }
        aggregator.finish()
    }

    /// Consume lines until every sender is dropped
    pub fn drain(mut self, rx: Receiver<String>) -> SizeTable {
        for line in rx {
            self.ingest(&line);
        }
        self.finish()
    }

    /// Drain `rx` on a dedicated thread; joining the handle is the
    /// completion signal.
    pub fn spawn(self, rx: Receiver<String>) -> io::Result<JoinHandle<SizeTable>> {
        thread::Builder::new()
            .name("nm-aggregator".to_string())
            .spawn(move || self.drain(rx))
    }

    fn ingest(&mut self, line: &str) {
        match parse_record(line) {
            Ok(record) if record.kind.is_undefined() => {
                self.stats.undefined += 1;
            }
            Ok(record) => {
                let key = fold_key(record.name, self.level);
                self.add(key, record.size_bytes);
                self.stats.records += 1;
            }
            Err(RecordError::Malformed(_)) => {
                self.stats.malformed += 1;
            }
            Err(RecordError::InvalidSize {
                name,
                token,
                source,
            }) => {
                warn!("invalid size {:?} for symbol {}: {}", token, name, source);
                // The key still shows up in the report, with nothing added.
                self.add(fold_key(&name, self.level), 0);
                self.stats.invalid_sizes += 1;
            }
        }
    }

    fn add(&mut self, key: &str, size_bytes: u64) {
        match self.totals.get_mut(key) {
            Some(total) => *total = total.saturating_add(size_bytes),
            None => {
                self.totals.insert(key.to_string(), size_bytes);
            }
        }
    }

    fn finish(self) -> SizeTable {
        SizeTable {
            totals: self.totals,
            stats: self.stats,
        }
    }
}

/// One package and its accumulated size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// Package key
    pub key: String,
    /// Accumulated size in bytes
    pub size_bytes: u64,
}

/// Completed, read-only aggregation result
#[derive(Debug, Clone, Default)]
pub struct SizeTable {
    totals: HashMap<String, u64>,
    stats: AggregateStats,
}

impl SizeTable {
    /// Sum of every package total, the empty key included
    pub fn total(&self) -> u64 {
        self.totals
            .values()
            .fold(0u64, |acc, size| acc.saturating_add(*size))
    }

    /// Accumulated size for one key
    pub fn get(&self, key: &str) -> Option<u64> {
        self.totals.get(key).copied()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// True when nothing was aggregated
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Input counters
    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    /// All entries by descending size; equal sizes are ordered by key so
    /// output is stable between runs.
    pub fn ranked(&self) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = self
            .totals
            .iter()
            .map(|(key, size)| RankedEntry {
                key: key.clone(),
                size_bytes: *size,
            })
            .collect();
        entries.sort_unstable_by(|a, b| {
            b.size_bytes
                .cmp(&a.size_bytes)
                .then_with(|| a.key.cmp(&b.key))
        });
        entries
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for SizeTable {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut totals: HashMap<String, u64> = HashMap::new();
        for (key, size) in iter {
            let total = totals.entry(key.into()).or_insert(0);
            *total = total.saturating_add(size);
        }
        Self {
            totals,
            stats: AggregateStats::default(),
        }
    }
}
