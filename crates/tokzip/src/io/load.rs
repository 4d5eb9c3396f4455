//! Load functionality for compressed artifacts.
//!
//! Loading validates the structural invariants of the persisted arrays
//! before rebuilding a compressor, so a corrupted or hand-edited artifact is
//! rejected instead of producing garbage on decode. Loaded compressors are
//! decode-only.

use super::format::SerializedArtifact;
use crate::compressor::{DictionaryKind, StringCompressor};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tokzip_core::{CompressorError, Result, TokenArena, SEED_TOKENS};

/// Artifact loader - reads a compressed corpus from disk.
pub struct ArtifactLoader;

impl ArtifactLoader {
    /// Loads a compressed artifact from `path`.
    pub fn load(path: &Path) -> Result<StringCompressor> {
        let file = File::open(path).map_err(|e| {
            CompressorError::Load(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        let serialized: SerializedArtifact = serde_json::from_reader(reader)
            .map_err(|e| CompressorError::Load(format!("Failed to deserialize artifact: {}", e)))?;

        Self::deserialize(serialized)
    }

    /// Validates and rebuilds a compressor from a serialized artifact.
    fn deserialize(data: SerializedArtifact) -> Result<StringCompressor> {
        let kind = match data.max_token_len {
            0 => DictionaryKind::Unbounded,
            16 => DictionaryKind::Capped16,
            other => {
                return Err(CompressorError::Load(format!(
                    "Unsupported token length cap: {}",
                    other
                )))
            }
        };

        let offsets = &data.token_offsets;
        if offsets.len() < SEED_TOKENS + 1 || offsets.len() > u16::MAX as usize + 2 {
            return Err(CompressorError::Load(format!(
                "Invalid token count: {}",
                offsets.len().saturating_sub(1)
            )));
        }
        if offsets[0] != 0 || offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(CompressorError::Load(
                "Token offsets are not monotonically non-decreasing from 0".to_string(),
            ));
        }
        if *offsets.last().unwrap() as usize != data.dictionary.len() {
            return Err(CompressorError::Load(format!(
                "Dictionary size {} does not match final offset {}",
                data.dictionary.len(),
                offsets.last().unwrap()
            )));
        }

        // Ids 0..=255 must be the single-byte tokens, in order.
        for i in 0..SEED_TOKENS {
            if offsets[i] != i as u32 || data.dictionary[i] != i as u8 {
                return Err(CompressorError::Load(format!(
                    "Token {} is not the expected single-byte seed token",
                    i
                )));
            }
        }

        if kind == DictionaryKind::Capped16 {
            let cap = kind.max_token_len() as u32;
            if offsets.windows(2).any(|w| w[1] - w[0] > cap) {
                return Err(CompressorError::Load(format!(
                    "Dictionary contains a token longer than {} bytes",
                    cap
                )));
            }
        }

        // A full dictionary holds exactly 65536 tokens, one past u16 range,
        // so the bound check stays in usize.
        let num_tokens = offsets.len() - 1;
        if data.token_stream.iter().any(|&id| (id as usize) >= num_tokens) {
            return Err(CompressorError::Load(format!(
                "Token stream references an id outside the dictionary of {} tokens",
                num_tokens
            )));
        }

        let bounds = &data.string_boundaries;
        if bounds.is_empty()
            || bounds[0] != 0
            || bounds.windows(2).any(|w| w[0] > w[1])
            || *bounds.last().unwrap() != data.token_stream.len()
        {
            return Err(CompressorError::Load(
                "String boundaries do not span the token stream".to_string(),
            ));
        }

        let tokens = TokenArena::from_parts(data.dictionary, data.token_offsets);
        Ok(StringCompressor::from_parts(
            kind,
            tokens,
            data.token_stream,
            data.string_boundaries,
        ))
    }
}
