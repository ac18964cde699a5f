//! Symbol size analysis
//!
//! Streams `go tool nm -size` output through a bounded channel into a
//! per-package aggregator and ranks the result.
//!
//! ```text
//! inspector stdout ─▶ nm-reader ─(sync_channel)─▶ nm-aggregator ─▶ SizeTable
//!                       drops U                     folds + sums
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use gosize::analyzer::SymbolAnalyzer;
//! use gosize::config::AnalyzerConfig;
//!
//! let analyzer = SymbolAnalyzer::new(AnalyzerConfig::new("./server"));
//! let table = analyzer.analyze()?;
//! let report = analyzer.report(&table);
//!
//! println!("Total size: {} bytes", report.total_bytes);
//! for entry in &report.entries {
//!     println!("  {} bytes - {}", entry.size_bytes, entry.key);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregator;
pub mod keyfold;
pub mod producer;
pub mod record;
pub mod size_report;
pub mod stage;
pub mod tokenizer;

pub use aggregator::{AggregateStats, Aggregator, RankedEntry, SizeTable};
pub use keyfold::fold_key;
pub use producer::ProducerStats;
pub use record::{parse_record, RecordError, SymbolKind, SymbolRecord};
pub use size_report::SizeReport;
pub use stage::PipelineStage;
pub use tokenizer::tokenize;

use std::cell::RefCell;
use std::io;
use std::process::{Child, Stdio};
use std::sync::mpsc;

use log::{debug, info, warn};

use crate::config::AnalyzerConfig;
use crate::error::GoSizeError;
use crate::infra::{CommandExecutor, RealCommandExecutor};
use stage::StageTracker;

/// Runs the inspector and aggregates its output
pub struct SymbolAnalyzer<CE: CommandExecutor = RealCommandExecutor> {
    config: AnalyzerConfig,
    cmd_executor: CE,
    stages: RefCell<StageTracker>,
}

impl SymbolAnalyzer {
    /// Create an analyzer that launches real processes
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_executor(config, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> SymbolAnalyzer<CE> {
    /// Create an analyzer with a custom command executor
    pub fn with_executor(config: AnalyzerConfig, cmd_executor: CE) -> Self {
        Self {
            config,
            cmd_executor,
            stages: RefCell::new(StageTracker::new()),
        }
    }

    /// Configuration this analyzer runs with
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Current pipeline stage
    pub fn stage(&self) -> PipelineStage {
        self.stages.borrow().current()
    }

    /// Launch the inspector and aggregate its output.
    ///
    /// Returns once the inspector has exited successfully and every line it
    /// printed has been folded into the table. Each call is a fresh run;
    /// stage tracking restarts from [`PipelineStage::Idle`].
    #[must_use = "Analysis results should be used or printed"]
    pub fn analyze(&self) -> Result<SizeTable, GoSizeError> {
        let result = self.collect();
        if result.is_err() {
            self.stages.borrow_mut().fail();
        }
        result
    }

    /// Rank an analyzed table using the configured `top`.
    ///
    /// Stage tracking only moves when called right after a successful
    /// [`analyze`](Self::analyze).
    pub fn report(&self, table: &SizeTable) -> SizeReport {
        let tracked = self.stage() == PipelineStage::Draining;
        if tracked {
            self.advance(PipelineStage::Reporting);
        }
        let report = SizeReport::new(table, self.config.top);
        if tracked {
            self.advance(PipelineStage::Done);
        }
        report
    }

    fn advance(&self, to: PipelineStage) {
        self.stages.borrow_mut().advance(to);
    }

    fn collect(&self) -> Result<SizeTable, GoSizeError> {
        self.stages.borrow_mut().reset();
        self.config.validate()?;
        debug!("grouping level {} (reserved)", self.config.level);
        if !self.config.nm.is_installed() {
            warn!("`{}` was not found on PATH", self.config.nm.program);
        }

        self.advance(PipelineStage::Launching);
        let mut child = self.launch()?;
        let program = self.config.nm.program.clone();

        let Some(stdout) = child.stdout.take() else {
            reap(&mut child);
            return Err(GoSizeError::PipeUnavailable { program });
        };

        let (tx, rx) = mpsc::sync_channel(self.config.channel_capacity);
        let reader = reap_on_err(&mut child, "nm-reader", producer::spawn_reader(stdout, tx))?;
        self.advance(PipelineStage::Streaming);

        let aggregator = reap_on_err(
            &mut child,
            "nm-aggregator",
            Aggregator::new(self.config.level).spawn(rx),
        )?;

        let status = child.wait().map_err(|source| GoSizeError::WaitFailed {
            program: program.clone(),
            source,
        })?;
        if !status.success() {
            return Err(GoSizeError::ProcessFailed {
                program,
                code: status.code().unwrap_or(-1),
            });
        }
        info!("{} finished", program);

        let produced = reader
            .join()
            .map_err(|_| GoSizeError::WorkerPanicked("nm-reader"))?;
        self.advance(PipelineStage::Draining);

        let table = aggregator
            .join()
            .map_err(|_| GoSizeError::WorkerPanicked("nm-aggregator"))?;
        let stats = table.stats();
        debug!(
            "aggregated {} of {} lines into {} packages ({} undefined, {} malformed, {} invalid sizes)",
            stats.records,
            produced.forwarded,
            table.len(),
            produced.undefined,
            stats.malformed,
            stats.invalid_sizes
        );

        Ok(table)
    }

    fn launch(&self) -> Result<Child, GoSizeError> {
        let nm = &self.config.nm;
        let file = &self.config.file;
        info!("start {} {}", nm, file.display());

        self.cmd_executor
            .launch(
                |cmd| {
                    cmd.args(&nm.args)
                        .arg(file)
                        .stdin(Stdio::null())
                        .stdout(Stdio::piped())
                },
                &nm.program,
            )
            .map_err(|source| GoSizeError::LaunchFailed {
                program: nm.program.clone(),
                source,
            })
    }
}

/// Kill and wait for a child the pipeline gave up on
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Map a worker spawn failure, reaping the already running inspector first
fn reap_on_err<T>(
    child: &mut Child,
    name: &'static str,
    spawned: io::Result<T>,
) -> Result<T, GoSizeError> {
    spawned.map_err(|source| {
        reap(child);
        GoSizeError::WorkerSpawn { name, source }
    })
}
