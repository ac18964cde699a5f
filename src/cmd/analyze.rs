//! Analyze command implementation

use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::analyzer::{SizeReport, SymbolAnalyzer};
use crate::config::AnalyzerConfig;

/// Run the inspector on the configured file and print the package report
///
/// # Examples
///
/// ```no_run
/// use gosize::cmd::cmd_analyze;
/// use gosize::config::AnalyzerConfig;
///
/// cmd_analyze(AnalyzerConfig::new("./server"), false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_analyze(config: AnalyzerConfig, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    analyze_to(config, json, &mut out)?;
    Ok(())
}

/// Same as [`cmd_analyze`], writing to `out`
pub fn analyze_to<W: Write>(config: AnalyzerConfig, json: bool, out: &mut W) -> Result<SizeReport> {
    let analyzer = SymbolAnalyzer::new(config);
    let table = analyzer.analyze()?;
    let report = analyzer.report(&table);

    if json {
        report
            .write_json(out)
            .context("Failed to write JSON report")?;
    } else {
        report.write_text(out).context("Failed to write report")?;
    }
    out.flush().context("Failed to flush report")?;

    Ok(report)
}
