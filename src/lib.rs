#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! gosize library
//!
//! Breaks the size of a Go binary down by package. Symbol sizes printed by
//! `go tool nm -size` are streamed through an aggregator that folds each
//! symbol name into its package and sums the sizes, and the largest packages
//! are reported.
//!
//! # Basic Example
//!
//! Aggregating nm output that is already in memory:
//!
//! ```
//! use gosize::analyzer::{Aggregator, SizeReport};
//! use gosize::config::{GroupingLevel, TopN};
//!
//! let nm_output = "\
//!  16b9450         16 R crypto.statictmp_0
//!  113b3e0        208 T crypto/cipher.xorBytes
//!  103cc90         32 T runtime.gcd
//! ";
//!
//! let table = Aggregator::from_lines(GroupingLevel::default(), nm_output.lines());
//! let report = SizeReport::new(&table, TopN::Count(1));
//!
//! assert_eq!(report.total_bytes, 256);
//! assert_eq!(report.entries[0].key, "crypto");
//! assert_eq!(report.entries[0].size_bytes, 224);
//! ```
//!
//! # Running the inspector
//!
//! ```no_run
//! use gosize::analyzer::SymbolAnalyzer;
//! use gosize::config::AnalyzerConfig;
//!
//! let analyzer = SymbolAnalyzer::new(AnalyzerConfig::new("./server"));
//! let table = analyzer.analyze()?;
//! analyzer.report(&table).write_text(&mut std::io::stdout())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Symbol parsing, aggregation and ranking
pub mod analyzer;
/// Command handlers for CLI operations
pub mod cmd;
/// Run configuration
pub mod config;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for process launching
pub mod infra;
