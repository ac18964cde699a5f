//! Infrastructure traits for abstracting process launching.
//!
//! The analyzer never calls `Command::spawn` directly; it goes through a
//! [`CommandExecutor`] so tests can substitute a failing or scripted launcher.

use std::io;
use std::process::{Child, Command};

/// Trait for abstracting command execution.
pub trait CommandExecutor {
    /// Start a command and return the running child.
    ///
    /// Stdio configuration is the caller's responsibility.
    fn spawn(&self, cmd: &mut Command) -> io::Result<Child>;

    /// Start a command built with a closure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gosize::infra::{CommandExecutor, RealCommandExecutor};
    /// use std::process::Stdio;
    ///
    /// let executor = RealCommandExecutor;
    /// let child = executor.launch(|cmd| {
    ///     cmd.args(["tool", "nm", "-size", "./app"])
    ///        .stdout(Stdio::piped())
    /// }, "go")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn launch<F>(&self, builder: F, program: &str) -> io::Result<Child>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.spawn(&mut cmd)
    }
}

/// Real command executor that delegates to std::process::Command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealCommandExecutor;

impl CommandExecutor for RealCommandExecutor {
    fn spawn(&self, cmd: &mut Command) -> io::Result<Child> {
        cmd.spawn()
    }
}
