//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Path to the input corpus (newline-separated strings)
    #[arg(short, long)]
    pub input: String,

    /// Number of decompression iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,

    /// Benchmark the 16-byte capped variant instead of the unbounded one
    #[arg(long, default_value_t = false)]
    pub capped: bool,
}

use super::split_records;
use anyhow::Result as AnyhowResult;
use std::fs;
use std::time::Instant;
use tokzip::{DictionaryKind, StringCompressor};

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    let raw = fs::read(&cmd.input)?;
    let strings = split_records(&raw);
    let total_bytes: usize = strings.iter().map(|s| s.len()).sum();

    let kind = if cmd.capped {
        DictionaryKind::Capped16
    } else {
        DictionaryKind::Unbounded
    };

    println!("Benchmarking {:?}...", kind);
    println!("  strings:    {}", strings.len());
    println!("  bytes:      {}", total_bytes);
    println!("  iterations: {}", cmd.iterations);
    println!();

    let start = Instant::now();
    let mut compressor = StringCompressor::with_capacity(kind, strings.len(), total_bytes);
    compressor.compress_strings(&strings);
    let compress_time = start.elapsed();

    let mut buffer = vec![0u8; compressor.total_decompressed_len()];

    // Warmup
    let _ = compressor.decompress_all(&mut buffer);

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        let _ = compressor.decompress_all(&mut buffer);
    }
    let decompress_time = start.elapsed();

    let mib = total_bytes as f64 / (1024.0 * 1024.0);
    let compress_secs = compress_time.as_secs_f64();
    let decompress_secs = decompress_time.as_secs_f64() / cmd.iterations as f64;

    println!("Results:");
    println!("  compression:   {:.3}s ({:.1} MiB/s)", compress_secs, mib / compress_secs);
    println!(
        "  decompression: {:.3}ms avg ({:.1} MiB/s)",
        decompress_secs * 1000.0,
        mib / decompress_secs
    );
    println!(
        "  ratio:         {:.3}",
        compressor.space_used() as f64 / total_bytes.max(1) as f64
    );

    Ok(())
}
