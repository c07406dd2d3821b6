//! CLI module for spawnedit - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
