//! Command handlers for the gosize CLI

pub mod analyze;

pub use analyze::cmd_analyze;
