//! Save functionality for compressed artifacts.

use super::format::SerializedArtifact;
use crate::compressor::{DictionaryKind, StringCompressor};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tokzip_core::{CompressorError, Result};

/// Artifact saver - writes a compressed corpus to disk.
pub struct ArtifactSaver<'a> {
    /// Compressor holding the state to persist
    compressor: &'a StringCompressor,
}

impl<'a> ArtifactSaver<'a> {
    /// Creates a new artifact saver.
    pub fn new(compressor: &'a StringCompressor) -> Self {
        Self { compressor }
    }

    /// Saves the compressed artifact as JSON at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            CompressorError::Save(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let writer = BufWriter::new(file);
        let serialized = self.serialize();
        serde_json::to_writer(writer, &serialized)
            .map_err(|e| CompressorError::Save(format!("Failed to serialize artifact: {}", e)))?;

        Ok(())
    }

    /// Serializes the compressor state to an artifact structure.
    fn serialize(&self) -> SerializedArtifact {
        let max_token_len = match self.compressor.kind() {
            DictionaryKind::Unbounded => 0,
            DictionaryKind::Capped16 => self.compressor.kind().max_token_len(),
        };

        SerializedArtifact {
            version: env!("CARGO_PKG_VERSION").to_string(),
            max_token_len,
            token_offsets: self.compressor.tokens().ends().to_vec(),
            dictionary: self.compressor.tokens().data().to_vec(),
            string_boundaries: self.compressor.string_bounds().to_vec(),
            token_stream: self.compressor.token_stream().to_vec(),
        }
    }
}
