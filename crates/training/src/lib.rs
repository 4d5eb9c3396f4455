//! Tokzip-training - Dictionary training infrastructure
//!
//! This crate builds tokzip's 16-bit token dictionary from a corpus in a
//! single randomized pass: strings are tokenized by longest-prefix matching
//! while adjacent token pairs are counted, and any pair that crosses the
//! promotion threshold is installed as a new token immediately, growing the
//! dictionary mid-walk.
//!
//! # Example
//!
//! ```rust
//! use tokzip_core::{PrefixMatcher, TokenArena};
//! use tokzip_training::{DictionaryTrainer, TrainingConfig};
//!
//! let data = b"foobarfoobar";
//! let ends = [0, 6, 12];
//!
//! let trainer = DictionaryTrainer::new(TrainingConfig::default());
//! let mut tokens = TokenArena::new();
//! let _matcher: PrefixMatcher = trainer.train(data, &ends, &mut tokens);
//! assert!(tokens.len() >= 256);
//! ```

pub use tokzip_core::{CompressorError, Result};

// Training infrastructure
pub mod training;
pub use training::{DictionaryTrainer, Pair, TrainingConfig};
