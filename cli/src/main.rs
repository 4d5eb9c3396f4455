//! Tokzip CLI - Command-line interface for the string compressor.
//!
//! This is the main entry point for the `tokzip` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BenchmarkCommand, CompressCommand, DecompressCommand, InspectCommand};

#[derive(Parser)]
#[command(name = "tokzip")]
#[command(about = "Dictionary compression for collections of short strings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a newline-separated corpus into an artifact
    Compress(CompressCommand),
    /// Decompress an artifact back into its strings
    Decompress(DecompressCommand),
    /// Show statistics about a compressed artifact
    Inspect(InspectCommand),
    /// Benchmark compression and decompression throughput
    Benchmark(BenchmarkCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compress(cmd) => commands::compress::run(cmd)?,
        Commands::Decompress(cmd) => commands::decompress::run(cmd)?,
        Commands::Inspect(cmd) => commands::inspect::run(cmd)?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd)?,
    }

    Ok(())
}
