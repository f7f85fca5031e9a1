//! # datahub-cli
//!
//! Command tree, interactive browse shell and output formatting for the
//! `datahub` binary.

pub mod commands;
pub mod output;

pub use commands::Cli;
