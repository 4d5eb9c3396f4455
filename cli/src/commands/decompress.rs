//! Decompress command implementation.

use clap::Parser;

/// Decompress command arguments.
#[derive(Parser)]
pub struct DecompressCommand {
    /// Path to the compressed artifact
    #[arg(short, long)]
    pub input: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use anyhow::Result as AnyhowResult;
use std::io::Write;
use std::path::Path;
use tokzip::ArtifactLoader;

pub fn run(cmd: DecompressCommand) -> AnyhowResult<()> {
    let compressor = ArtifactLoader::load(Path::new(&cmd.input))?;

    let mut out = Vec::with_capacity(compressor.total_decompressed_len() + compressor.num_strings());
    let mut buffer = Vec::new();
    for i in 0..compressor.num_strings() {
        buffer.resize(compressor.decompressed_len(i), 0);
        let len = compressor.decompress_string(i, &mut buffer);
        // The output format is newline-delimited, so a string with an
        // embedded newline cannot be represented unambiguously.
        if buffer[..len].contains(&b'\n') {
            anyhow::bail!(
                "string {} contains an embedded newline and cannot be written \
                 as a newline-separated record",
                i
            );
        }
        out.extend_from_slice(&buffer[..len]);
        out.push(b'\n');
    }

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &out)?;
            println!("Decompressed {} strings to {}", compressor.num_strings(), path);
        }
        None => {
            std::io::stdout().write_all(&out)?;
        }
    }

    Ok(())
}
