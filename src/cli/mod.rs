//! CLI command implementations
//!
//! All harness logic lives here, extracted from main.rs for testability:
//! random operand generation, operand/table rendering and report formatting.
//! The kernel itself never prints; this module owns every observable side
//! effect.

// CLI glue code - relaxed lint requirements
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;

use crate::error::{Result, TabularError};
use crate::lut::{
    AccumMode, LANE_WIDTH, ProductTable, detect_simd_backend, lut_dot_w2a2, lut_dot_w2a2_simd,
};

/// Tabular - table-lookup kernels for 2-bit quantized dot products
#[derive(Parser)]
#[command(name = "tabular")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute a dot product over randomly generated packed operands
    ///
    /// Examples:
    ///   tabular run
    ///   tabular run --elements 1024 --seed 42
    ///   tabular run --wide --format json
    Run {
        /// Packed bytes per operand (must be a multiple of the 32-byte lane width)
        #[arg(short, long, default_value = "32")]
        elements: usize,

        /// Seed for reproducible operand generation (entropy-seeded if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Accumulate into wide per-lane counters instead of wrapping i8 lanes
        #[arg(long)]
        wide: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print the 16-entry product table for the default W2A2 domains
    Table,
    /// Show version and detected SIMD backend
    Info,
}

/// Machine-readable report for `run --format json`
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Packed bytes per operand
    pub elements: usize,
    /// Scalar multiply-adds performed (four per packed byte)
    pub multiply_adds: usize,
    /// Seed the operands were generated from, when one was given
    pub seed: Option<u64>,
    /// SIMD backend the kernel dispatched to
    pub backend: String,
    /// Accumulation mode the kernel ran with
    pub mode: String,
    /// The dot product
    pub dot: i32,
}

/// Main CLI entrypoint - dispatches commands to handlers
pub fn entrypoint(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Run {
            elements,
            seed,
            wide,
            format,
        } => handle_run(&mut out, elements, seed, wide, &format),
        Commands::Table => handle_table(&mut out),
        Commands::Info => handle_info(&mut out),
    }
}

/// Generate `len` random packed bytes
///
/// Every byte value is four valid 2-bit fields by construction, so raw
/// random bytes are always well-formed operands.
fn random_packed(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

fn handle_run(
    out: &mut impl Write,
    elements: usize,
    seed: Option<u64>,
    wide: bool,
    format: &str,
) -> Result<()> {
    if format != "text" && format != "json" {
        return Err(TabularError::InvalidConfiguration(format!(
            "unknown output format '{format}' (expected 'text' or 'json')"
        )));
    }

    let mode = if wide {
        AccumMode::Wide32
    } else {
        AccumMode::Wrap8
    };
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let weights = random_packed(&mut rng, elements);
    let activations = random_packed(&mut rng, elements);

    let table = ProductTable::w2a2();
    let dot = lut_dot_w2a2_simd(&weights, &activations, &table, mode)?;
    debug_assert_eq!(
        Some(dot),
        lut_dot_w2a2(&weights, &activations, &table, mode).ok()
    );

    let report = RunReport {
        elements,
        multiply_adds: elements * 4,
        seed,
        backend: detect_simd_backend().to_string(),
        mode: mode.to_string(),
        dot,
    };

    if format == "json" {
        let json = serde_json::to_string_pretty(&report)?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    writeln!(
        out,
        "Packed bytes per operand: {elements} ({} multiply-adds)",
        report.multiply_adds
    )?;
    writeln!(out, "Weights (4 packed 2-bit fields per byte):")?;
    writeln!(out, "  {}", render_bytes(&weights))?;
    writeln!(out, "Activations (4 packed 2-bit fields per byte):")?;
    writeln!(out, "  {}", render_bytes(&activations))?;
    writeln!(out, "Product table: {}", render_table(&table))?;
    writeln!(out, "Backend: {} / mode: {}", report.backend, report.mode)?;
    writeln!(out, "Dot product result: {dot}")?;
    Ok(())
}

fn handle_table(out: &mut impl Write) -> Result<()> {
    let table = ProductTable::w2a2();
    writeln!(out, "W2A2 product table (key = weight_idx << 2 | act_idx):")?;
    writeln!(out, "  {}", render_table(&table))?;
    Ok(())
}

fn handle_info(out: &mut impl Write) -> Result<()> {
    writeln!(out, "tabular {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "lane width: {LANE_WIDTH} bytes")?;
    writeln!(out, "SIMD backend: {}", detect_simd_backend())?;
    Ok(())
}

fn render_bytes(bytes: &[u8]) -> String {
    let rendered: Vec<String> = bytes.iter().map(|b| format!("{b:#04x}")).collect();
    rendered.join(" ")
}

fn render_table(table: &ProductTable) -> String {
    let rendered: Vec<String> = table.entries().iter().map(ToString::to_string).collect();
    rendered.join(" ")
}
