//! Run configuration
//!
//! Everything a gosize run needs is collected into an [`AnalyzerConfig`]
//! from CLI flags and validated before the inspector is launched.

use std::fmt;
use std::path::PathBuf;

use crate::error::GoSizeError;

/// Default number of ranked entries printed
pub const DEFAULT_TOP: i64 = 20;

/// Default grouping level
pub const DEFAULT_LEVEL: u32 = 2;

/// Pending lines buffered between the reader and the aggregator
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1 << 12;

/// Default inspector invocation; the target file is appended
pub const DEFAULT_NM_COMMAND: &str = "go tool nm -size";

/// How many ranked entries the report prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopN {
    /// Every entry
    All,
    /// At most this many entries
    Count(usize),
}

impl TopN {
    /// Map the CLI count: negative means all.
    ///
    /// # Examples
    ///
    /// ```
    /// use gosize::config::TopN;
    ///
    /// assert_eq!(TopN::from_signed(-1), TopN::All);
    /// assert_eq!(TopN::from_signed(10), TopN::Count(10));
    /// ```
    pub fn from_signed(n: i64) -> Self {
        if n < 0 {
            Self::All
        } else {
            Self::Count(usize::try_from(n).unwrap_or(usize::MAX))
        }
    }

    /// Number of entries to take out of `available`
    pub fn clamp(self, available: usize) -> usize {
        match self {
            Self::All => available,
            Self::Count(n) => n.min(available),
        }
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self::from_signed(DEFAULT_TOP)
    }
}

/// Package grouping granularity.
///
/// Reserved: accepted and validated, but key folding does not vary with it
/// yet. See [`crate::analyzer::fold_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingLevel(u32);

impl GroupingLevel {
    /// Create a grouping level; zero is rejected
    pub fn new(level: u32) -> Result<Self, GoSizeError> {
        if level == 0 {
            return Err(GoSizeError::InvalidConfig(
                "grouping level must be at least 1".to_string(),
            ));
        }
        Ok(Self(level))
    }

    /// Raw level value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for GroupingLevel {
    fn default() -> Self {
        Self(DEFAULT_LEVEL)
    }
}

impl fmt::Display for GroupingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inspector command: program plus leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NmCommand {
    /// Executable name or path
    pub program: String,
    /// Arguments placed before the target file
    pub args: Vec<String>,
}

impl NmCommand {
    /// Parse a whitespace-separated command line such as `go tool nm -size`
    ///
    /// # Examples
    ///
    /// ```
    /// use gosize::config::NmCommand;
    ///
    /// let cmd = NmCommand::parse("nm --size-sort").unwrap();
    /// assert_eq!(cmd.program, "nm");
    /// assert_eq!(cmd.args, vec!["--size-sort"]);
    /// assert!(NmCommand::parse("   ").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self, GoSizeError> {
        let mut words = line.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| GoSizeError::InvalidConfig("inspector command is empty".to_string()))?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Check if the program can be found on PATH
    pub fn is_installed(&self) -> bool {
        which::which(&self.program).is_ok()
    }
}

impl Default for NmCommand {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            args: vec!["tool".to_string(), "nm".to_string(), "-size".to_string()],
        }
    }
}

impl fmt::Display for NmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Complete configuration for one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Binary to inspect
    pub file: PathBuf,
    /// Number of ranked entries to report
    pub top: TopN,
    /// Reserved grouping level
    pub level: GroupingLevel,
    /// Inspector invocation
    pub nm: NmCommand,
    /// Bounded channel capacity between reader and aggregator
    pub channel_capacity: usize,
}

impl AnalyzerConfig {
    /// Configuration with defaults for everything but the target file
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            top: TopN::default(),
            level: GroupingLevel::default(),
            nm: NmCommand::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> Result<(), GoSizeError> {
        if self.file.as_os_str().is_empty() {
            return Err(GoSizeError::FileRequired);
        }
        if self.nm.program.is_empty() {
            return Err(GoSizeError::InvalidConfig(
                "inspector command is empty".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(GoSizeError::InvalidConfig(
                "channel capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
