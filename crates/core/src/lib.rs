//! Tokzip-core - Core data structures for dictionary string compression
//!
//! This crate provides the leaf components of the tokzip compressor: the
//! token arena that stores every dictionary entry's bytes contiguously, and
//! the longest-prefix matchers that answer "which registered pattern starts
//! here?" at near-hash-lookup cost.
//!
//! # Features
//!
//! - Contiguous arena storage with id-indexed offsets
//! - Hybrid short/long pattern matching keyed on little-endian word loads
//! - An unbounded-length matcher and a denser 16-byte-capped matcher behind
//!   one trait
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use tokzip_core::{PrefixMatcher, PrefixSearch};
//!
//! let mut matcher = PrefixMatcher::new();
//! for byte in 0..=255u8 {
//!     matcher.insert(&[byte], byte as u16);
//! }
//! matcher.insert(b"https://", 256);
//! assert_eq!(matcher.find_longest_match(b"https://a"), Some((256, 8)));
//! ```

pub mod error;
pub use error::{CompressorError, Result};

// Core compression data structures
pub mod core;
pub use core::{
    PrefixMatcher, PrefixMatcher16, PrefixSearch, TokenArena, BUCKET_MAX, MAX_TOKEN_ID,
    SEED_TOKENS,
};
