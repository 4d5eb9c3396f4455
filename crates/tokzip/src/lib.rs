//! Tokzip - Dictionary compression for collections of short strings
//!
//! Tokzip compresses large collections of short strings (identifiers, URLs,
//! log keys) by learning a 16-bit token dictionary from the corpus itself
//! and re-encoding every string as a sequence of token ids. Training is a
//! single randomized pass that promotes frequent adjacent token pairs into
//! new tokens; encoding greedily replays the learned dictionary through a
//! longest-prefix matcher; decoding is an arena lookup per token.
//!
//! Two dictionary policies are available: [`DictionaryKind::Unbounded`]
//! (token length limited only by the promotion sequence) and
//! [`DictionaryKind::Capped16`] (tokens of at most 16 bytes with a denser
//! matcher representation).
//!
//! # Example
//!
//! ```rust
//! use tokzip::{DictionaryKind, StringCompressor};
//!
//! let strings = vec!["orders/2024/item", "orders/2024/user", "orders/2024/cart"];
//! let mut compressor = StringCompressor::new(DictionaryKind::Unbounded);
//! compressor.compress_strings(&strings);
//!
//! let mut buffer = vec![0u8; compressor.decompressed_len(1)];
//! let len = compressor.decompress_string(1, &mut buffer);
//! assert_eq!(&buffer[..len], b"orders/2024/user");
//! ```

// Re-export core types
pub use tokzip_core::{
    CompressorError, PrefixMatcher, PrefixMatcher16, PrefixSearch, Result, TokenArena,
};
pub use tokzip_training::{DictionaryTrainer, TrainingConfig};

// Compressor API
pub mod compressor;
pub use compressor::{DictionaryKind, StringCompressor};

// IO/Serialization
pub mod io;
pub use io::{ArtifactLoader, ArtifactSaver, SerializedArtifact};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
