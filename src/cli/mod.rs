//! Command line interface for the cinedex binary.

pub mod args;
pub mod commands;

pub use args::{CinedexArgs, Command};
pub use commands::execute_command;
