use clap::Parser;
use std::path::PathBuf;
use std::process;

use gosize::cmd;
use gosize::config::{
    AnalyzerConfig, GroupingLevel, NmCommand, TopN, DEFAULT_LEVEL, DEFAULT_NM_COMMAND, DEFAULT_TOP,
};
use gosize::error::ErrorFormatter;

/// Per-package size breakdown of Go binaries
///
/// Runs `go tool nm -size` on the given binary, sums symbol sizes per
/// package and prints the largest packages.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Binary to inspect
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Number of packages to print (negative prints all)
    #[arg(long, default_value_t = DEFAULT_TOP, allow_negative_numbers = true)]
    top: i64,

    /// Package grouping level (reserved)
    #[arg(short, long, default_value_t = DEFAULT_LEVEL)]
    level: u32,

    /// Inspector command; the file path is appended
    #[arg(long, env = "GOSIZE_NM", default_value = DEFAULT_NM_COMMAND)]
    nm: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<AnalyzerConfig> {
        let mut config = AnalyzerConfig::new(self.file.unwrap_or_default());
        config.top = TopN::from_signed(self.top);
        config.level = GroupingLevel::new(self.level)?;
        config.nm = NmCommand::parse(&self.nm)?;
        Ok(config)
    }
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json;

    let result = cli
        .into_config()
        .and_then(|config| cmd::cmd_analyze(config, json));

    if let Err(e) = result {
        eprintln!("{}", ErrorFormatter::format(&e));
        process::exit(ErrorFormatter::exit_code(&e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }

    #[test]
    fn test_negative_top_parses_as_all() {
        let cli = Cli::try_parse_from(["gosize", "-f", "app", "--top", "-1"]).unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.top, TopN::All);
    }

    #[test]
    fn test_defaults_top_twenty_level_two() {
        let cli = Cli::try_parse_from(["gosize", "-f", "app"]).unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.top, TopN::Count(20));
        assert_eq!(config.level.get(), 2);
        assert_eq!(config.nm, NmCommand::default());
    }

    #[test]
    fn test_zero_level_rejected() {
        let cli = Cli::try_parse_from(["gosize", "-f", "app", "-l", "0"]).unwrap();
        assert!(cli.into_config().is_err());
    }
}
