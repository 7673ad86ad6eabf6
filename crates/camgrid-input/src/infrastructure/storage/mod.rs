//! Storage infrastructure: configuration file loading.
//!
//! A thin adapter between the binary and the file system.  The `config`
//! sub-module reads the TOML configuration from the platform config
//! directory and falls back to defaults when no file exists yet.

pub mod config;
