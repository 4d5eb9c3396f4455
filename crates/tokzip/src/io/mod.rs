//! Serialization and deserialization for compressed artifacts.
//!
//! This module persists the four arrays that define a compressed corpus
//! (token offsets, dictionary bytes, string boundaries, token stream) and
//! rebuilds decode-only compressors from them.

pub mod format;
pub mod load;
pub mod save;

pub use format::SerializedArtifact;
pub use load::ArtifactLoader;
pub use save::ArtifactSaver;
