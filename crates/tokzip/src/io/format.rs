//! Format definitions for compressed-artifact serialization.
//!
//! The persisted state is the minimal set needed to decode: the token
//! offsets and dictionary bytes, the per-string boundaries, and the token
//! stream. The matcher is a training-time structure and is never persisted.

use serde::{Deserialize, Serialize};

/// Complete compressed-artifact serialization format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedArtifact {
    /// Format version
    pub version: String,
    /// Token length cap the dictionary was trained under (0 = unbounded)
    pub max_token_len: usize,
    /// Token end offsets into the dictionary (`off`)
    pub token_offsets: Vec<u32>,
    /// Raw token contents in id order (`D`)
    pub dictionary: Vec<u8>,
    /// Per-string end offsets into the token stream (`B`)
    pub string_boundaries: Vec<usize>,
    /// Compressed stream of token ids (`C`)
    pub token_stream: Vec<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_roundtrip() {
        let artifact = SerializedArtifact {
            version: "1.0.0".to_string(),
            max_token_len: 16,
            token_offsets: vec![0, 1, 2],
            dictionary: vec![b'a', b'b'],
            string_boundaries: vec![0, 2],
            token_stream: vec![0, 1],
        };

        let json = serde_json::to_string(&artifact).unwrap();
        let deserialized: SerializedArtifact = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.version, artifact.version);
        assert_eq!(deserialized.max_token_len, 16);
        assert_eq!(deserialized.token_offsets, artifact.token_offsets);
        assert_eq!(deserialized.dictionary, artifact.dictionary);
        assert_eq!(deserialized.string_boundaries, artifact.string_boundaries);
        assert_eq!(deserialized.token_stream, artifact.token_stream);
    }
}
