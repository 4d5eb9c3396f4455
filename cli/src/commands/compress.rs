//! Compress command implementation.

use clap::Parser;

/// Compress command arguments.
#[derive(Parser)]
pub struct CompressCommand {
    /// Path to the input corpus (newline-separated strings)
    #[arg(short, long)]
    pub input: String,

    /// Path for the compressed artifact
    #[arg(short, long)]
    pub output: String,

    /// Cap tokens at 16 bytes (denser matcher, bounded dictionary entries)
    #[arg(long, default_value_t = false)]
    pub capped: bool,

    /// Fixed training seed for reproducible dictionaries
    #[arg(long)]
    pub seed: Option<u64>,
}

use super::split_records;
use anyhow::Result as AnyhowResult;
use std::fs;
use std::path::Path;
use tokzip::{ArtifactSaver, DictionaryKind, StringCompressor, TrainingConfig};

pub fn run(cmd: CompressCommand) -> AnyhowResult<()> {
    let raw = fs::read(&cmd.input)?;
    let strings = split_records(&raw);
    let total_bytes: usize = strings.iter().map(|s| s.len()).sum();

    let kind = if cmd.capped {
        DictionaryKind::Capped16
    } else {
        DictionaryKind::Unbounded
    };

    let mut compressor = StringCompressor::with_capacity(kind, strings.len(), total_bytes)
        .with_training_config(TrainingConfig {
            seed: cmd.seed,
            ..Default::default()
        });
    compressor.compress_strings(&strings);
    compressor.shrink_to_fit();

    ArtifactSaver::new(&compressor).save(Path::new(&cmd.output))?;

    let used = compressor.space_used();
    println!("Compressed {} strings to {}", compressor.num_strings(), cmd.output);
    println!("  corpus bytes:  {}", total_bytes);
    println!("  space used:    {}", used);
    println!("  tokens:        {}", compressor.num_tokens());
    if total_bytes > 0 {
        println!("  ratio:         {:.3}", used as f64 / total_bytes as f64);
    }

    Ok(())
}
