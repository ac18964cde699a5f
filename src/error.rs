//! Error types with contextual suggestions
//!
//! Fatal conditions of a gosize run: bad configuration, an inspector that
//! cannot be launched, and an inspector that fails while running. Each
//! variant carries a suggestion and a sysexits-style exit code.
//!
//! Per-record problems (unparseable sizes, short lines) are never errors;
//! the aggregator logs or counts them and keeps going.
//!
//! # Examples
//!
//! ```
//! use gosize::error::GoSizeError;
//!
//! let err = GoSizeError::FileRequired;
//! assert_eq!(err.exit_code(), 64);
//! assert!(err.suggestion().unwrap().contains("-f"));
//! ```

use std::io;
use thiserror::Error;

/// Fatal gosize errors
#[derive(Error, Debug)]
pub enum GoSizeError {
    /// No target file was given
    #[error("file path is empty")]
    FileRequired,

    /// Configuration value rejected before launch
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The inspector process could not be started
    #[error("failed to start `{program}`")]
    LaunchFailed {
        /// Program that was spawned
        program: String,
        #[source]
        /// IO error source
        source: io::Error,
    },

    /// The inspector's stdout could not be attached
    #[error("stdout pipe of `{program}` is unavailable")]
    PipeUnavailable {
        /// Program that was spawned
        program: String,
    },

    /// Waiting on the inspector failed
    #[error("failed to wait for `{program}`")]
    WaitFailed {
        /// Program that was spawned
        program: String,
        #[source]
        /// IO error source
        source: io::Error,
    },

    /// The inspector exited unsuccessfully
    #[error("`{program}` exited with status {code}")]
    ProcessFailed {
        /// Program that was spawned
        program: String,
        /// Exit code, -1 when terminated by a signal
        code: i32,
    },

    /// A pipeline worker thread could not be started
    #[error("failed to start {name} thread")]
    WorkerSpawn {
        /// Thread name
        name: &'static str,
        #[source]
        /// IO error source
        source: io::Error,
    },

    /// A pipeline worker thread panicked
    #[error("{0} thread panicked")]
    WorkerPanicked(&'static str),
}

impl GoSizeError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::FileRequired => {
                Some("Pass the binary to inspect: gosize -f <path/to/binary>".to_string())
            }
            Self::InvalidConfig(_) => Some("Run 'gosize --help' for valid values".to_string()),
            Self::LaunchFailed { program, source } => {
                if program == "go" {
                    Some("Install the Go toolchain and make sure `go` is on PATH".to_string())
                } else if source.kind() == io::ErrorKind::PermissionDenied {
                    Some(format!("Check that {} is executable", program))
                } else {
                    Some(format!(
                        "Check that {} is installed or pass another command with --nm",
                        program
                    ))
                }
            }
            Self::ProcessFailed { .. } => Some(
                "Make sure the target is a binary the inspector understands; its stderr is shown above"
                    .to_string(),
            ),
            Self::PipeUnavailable { .. }
            | Self::WaitFailed { .. }
            | Self::WorkerSpawn { .. }
            | Self::WorkerPanicked(_) => None,
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h and shell conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileRequired => 64,       // EX_USAGE
            Self::InvalidConfig(_) => 64,   // EX_USAGE
            Self::LaunchFailed { source, .. } => {
                if source.kind() == io::ErrorKind::NotFound {
                    127 // Command not found
                } else {
                    126 // Command not executable
                }
            }
            Self::PipeUnavailable { .. } => 74, // EX_IOERR
            Self::WaitFailed { .. } => 74,      // EX_IOERR
            Self::ProcessFailed { .. } => 1,
            Self::WorkerSpawn { .. } => 71, // EX_OSERR
            Self::WorkerPanicked(_) => 70,  // EX_SOFTWARE
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with cause chain and suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(gs_error) = error.downcast_ref::<GoSizeError>() {
            if let Some(suggestion) = gs_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(gs_error) = error.downcast_ref::<GoSizeError>() {
            gs_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch_error(program: &str, kind: io::ErrorKind) -> GoSizeError {
        GoSizeError::LaunchFailed {
            program: program.to_string(),
            source: io::Error::new(kind, "boom"),
        }
    }

    #[test]
    fn test_exit_codes_follow_conventions() {
        assert_eq!(GoSizeError::FileRequired.exit_code(), 64);
        assert_eq!(
            launch_error("go", io::ErrorKind::NotFound).exit_code(),
            127
        );
        assert_eq!(
            launch_error("nm", io::ErrorKind::PermissionDenied).exit_code(),
            126
        );
        let failed = GoSizeError::ProcessFailed {
            program: "go".to_string(),
            code: 2,
        };
        assert_eq!(failed.exit_code(), 1);
    }

    #[test]
    fn test_launch_failure_for_go_suggests_toolchain() {
        let suggestion = launch_error("go", io::ErrorKind::NotFound)
            .suggestion()
            .expect("LaunchFailed should have suggestion");
        assert!(suggestion.contains("Go toolchain"));
    }

    #[test]
    fn test_launch_failure_for_custom_program_mentions_flag() {
        let suggestion = launch_error("llvm-nm", io::ErrorKind::NotFound)
            .suggestion()
            .expect("LaunchFailed should have suggestion");
        assert!(suggestion.contains("llvm-nm"));
        assert!(suggestion.contains("--nm"));
    }

    #[test]
    fn test_process_failed_message_includes_code() {
        let err = GoSizeError::ProcessFailed {
            program: "go".to_string(),
            code: 3,
        };
        assert_eq!(err.to_string(), "`go` exited with status 3");
    }

    #[test]
    fn test_formatter_prints_cause_and_help() {
        let err = anyhow::Error::new(launch_error("go", io::ErrorKind::NotFound));
        let formatted = ErrorFormatter::format(&err);

        assert!(formatted.contains("failed to start `go`"));
        assert!(formatted.contains("caused by:"));
        assert!(formatted.contains("boom"));
        assert!(formatted.contains("help:"));
        assert_eq!(ErrorFormatter::exit_code(&err), 127);
    }

    #[test]
    fn test_formatter_generic_error_exits_one() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ErrorFormatter::exit_code(&err), 1);
        assert!(!ErrorFormatter::format(&err).contains("help:"));
    }
}
