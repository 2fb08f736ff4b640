//! whetherman command-line interface
//!
//! Argument parsing, command execution and logging setup for the
//! `whetherman` binary.

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{Cli, Commands, ConfigCommands, FormatArg, UnitsArg};
pub use commands::{error_hint, run};
pub use logging::{init_logging, log_filter_from_verbosity};
