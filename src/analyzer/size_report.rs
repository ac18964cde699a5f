//! Package size report formatting
//!
//! Text output is line oriented so it can be piped into other tools:
//!
//! ```text
//! total: 1.25 MB
//! size: 512.00 KB	pkg: runtime
//! size: 224 B	pkg: crypto
//! ```

use std::io::{self, Write};

use serde::Serialize;

use super::aggregator::{AggregateStats, RankedEntry, SizeTable};
use crate::config::TopN;
use crate::fmt::format_bytes;

/// Ranked view of a [`SizeTable`], ready to print
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    /// Sum of every package, including ones not listed
    pub total_bytes: u64,
    /// Largest packages first, limited to `top` ranks; never contains the empty key
    pub entries: Vec<RankedEntry>,
    /// Input counters from aggregation
    pub stats: AggregateStats,
}

impl SizeReport {
    /// Rank `table` and keep the first `top` named packages.
    ///
    /// The first `top` ranked packages are taken, then the empty key is
    /// dropped from them: it counts toward `total_bytes` and occupies its
    /// rank, but is never listed. A `top` larger than the number of packages
    /// lists them all.
    ///
    /// # Examples
    ///
    /// ```
    /// use gosize::analyzer::{SizeReport, SizeTable};
    /// use gosize::config::TopN;
    ///
    /// let table: SizeTable = [("crypto", 224u64), ("runtime", 32)].into_iter().collect();
    /// let report = SizeReport::new(&table, TopN::Count(1));
    ///
    /// assert_eq!(report.total_bytes, 256);
    /// assert_eq!(report.entries.len(), 1);
    /// assert_eq!(report.entries[0].key, "crypto");
    /// ```
    pub fn new(table: &SizeTable, top: TopN) -> Self {
        let ranked = table.ranked();
        let shown = top.clamp(ranked.len());
        let entries = ranked
            .into_iter()
            .take(shown)
            .filter(|entry| !entry.key.is_empty())
            .collect();

        Self {
            total_bytes: table.total(),
            entries,
            stats: table.stats(),
        }
    }

    /// Write the plain-text report
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "total: {}", format_bytes(self.total_bytes))?;
        for entry in &self.entries {
            writeln!(
                out,
                "size: {}\tpkg: {}",
                format_bytes(entry.size_bytes),
                entry.key
            )?;
        }
        Ok(())
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> SizeTable {
        entries.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn render(report: &SizeReport) -> String {
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_top_one_prints_total_and_largest() {
        let report = SizeReport::new(&table(&[("crypto", 224), ("runtime", 32)]), TopN::Count(1));

        assert_eq!(render(&report), "total: 256 B\nsize: 224 B\tpkg: crypto\n");
    }

    #[test]
    fn test_top_larger_than_entries_lists_all() {
        let report = SizeReport::new(&table(&[("a", 3), ("b", 2), ("c", 1)]), TopN::Count(50));
        assert_eq!(report.entries.len(), 3);
    }

    #[test]
    fn test_all_lists_every_named_package() {
        let report = SizeReport::new(
            &table(&[("a", 3), ("", 100), ("b", 2)]),
            TopN::from_signed(-1),
        );

        let keys: Vec<&str> = report.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(report.total_bytes, 105);
    }

    #[test]
    fn test_empty_key_uses_its_slot() {
        let entries = [("", 100), ("a", 3), ("b", 2)];

        let report = SizeReport::new(&table(&entries), TopN::Count(1));
        assert!(report.entries.is_empty());
        assert_eq!(render(&report), "total: 105 B\n");

        let report = SizeReport::new(&table(&entries), TopN::Count(2));
        let keys: Vec<&str> = report.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a"]);
        assert!(!render(&report).contains("pkg: \n"));
    }

    #[test]
    fn test_top_zero_prints_only_total() {
        let report = SizeReport::new(&table(&[("a", 2048)]), TopN::Count(0));
        assert_eq!(render(&report), "total: 2.00 KB\n");
    }

    #[test]
    fn test_empty_table_reports_zero() {
        let report = SizeReport::new(&SizeTable::default(), TopN::All);
        assert_eq!(render(&report), "total: 0 B\n");
    }

    #[test]
    fn test_json_output_parses() {
        let report = SizeReport::new(&table(&[("crypto", 224), ("runtime", 32)]), TopN::All);
        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total_bytes"], 256);
        assert_eq!(value["entries"][0]["key"], "crypto");
        assert_eq!(value["entries"][1]["size_bytes"], 32);
        assert_eq!(value["stats"]["records"], 0);
    }
}
