//! # CLI Module
//!
//! Command-line surface of the `rpcroute-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Write gin route registration files for every schema file that declares
//! services:
//!
//! ```bash
//! rpcroute-gen generate --input descriptors.yaml --output gen
//! ```
//!
//! Options:
//! - `--input <FILE>` - Descriptor set, YAML or JSON (required)
//! - `--output <DIR>` - Output root (default: current directory)
//! - `--config <FILE>` - Generator config (default: `rpcroute.toml` beside the input)
//! - `--force` - Overwrite existing files
//! - `--dry-run` - Show what would be written
//! - `--no-format` - Skip the formatter
//!
//! ### `inspect`
//!
//! Print the resolved route table, or JSON with `--json`:
//!
//! ```bash
//! rpcroute-gen inspect --input descriptors.yaml
//! ```
//!
//! ### `lint`
//!
//! ```bash
//! rpcroute-gen lint --input descriptors.yaml --fail-on-error
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use rpcroute::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(&Cli::parse())?;
//! ```

mod commands;


pub use commands::{format_route_table, run_cli, Cli, Commands};
