//! Inspect command implementation.

use clap::Parser;

/// Inspect command arguments.
#[derive(Parser)]
pub struct InspectCommand {
    /// Path to the compressed artifact
    #[arg(short, long)]
    pub input: String,
}

use anyhow::Result as AnyhowResult;
use std::path::Path;
use tokzip::{ArtifactLoader, DictionaryKind};

pub fn run(cmd: InspectCommand) -> AnyhowResult<()> {
    let compressor = ArtifactLoader::load(Path::new(&cmd.input))?;

    let num_tokens = compressor.num_tokens();
    let learned = num_tokens - 256;
    let dict_bytes = compressor.tokens().data().len();

    // Token length histogram over the learned part of the dictionary.
    let mut histogram = [0usize; 5];
    let mut longest = 0usize;
    for id in 256..num_tokens {
        let len = compressor.tokens().token_len(id as u16);
        longest = longest.max(len);
        let bucket = match len {
            0..=1 => 0,
            2..=4 => 1,
            5..=8 => 2,
            9..=16 => 3,
            _ => 4,
        };
        histogram[bucket] += 1;
    }

    let variant = match compressor.kind() {
        DictionaryKind::Unbounded => "unbounded",
        DictionaryKind::Capped16 => "16-byte capped",
    };

    println!("Artifact: {}", cmd.input);
    println!("  variant:           {}", variant);
    println!("  strings:           {}", compressor.num_strings());
    println!("  stream ids:        {}", compressor.token_stream().len());
    println!("  decoded bytes:     {}", compressor.total_decompressed_len());
    println!("  space used:        {}", compressor.space_used());
    println!();
    println!("Dictionary:");
    println!("  tokens:            {} ({} learned)", num_tokens, learned);
    println!("  content bytes:     {}", dict_bytes);
    println!("  longest token:     {} bytes", longest);
    println!(
        "  learned lengths:   1: {}  2-4: {}  5-8: {}  9-16: {}  >16: {}",
        histogram[0], histogram[1], histogram[2], histogram[3], histogram[4]
    );

    Ok(())
}
