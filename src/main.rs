//! Tabular CLI - W2A2 table-lookup dot product harness
//!
//! # Commands
//!
//! - `run` - compute a dot product over randomly generated packed operands
//! - `table` - print the product table for the default domains
//! - `info` - show version and detected SIMD backend

use clap::Parser;
use tabular::cli::{Cli, entrypoint};
use tabular::error::Result;

fn main() -> Result<()> {
    entrypoint(Cli::parse())
}
