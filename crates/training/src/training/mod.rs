//! Training infrastructure for the tokzip dictionary.
//!
//! This module provides the online pair-promotion trainer that builds a
//! token dictionary from a flattened corpus.

pub mod trainer;

pub use trainer::{DictionaryTrainer, Pair, TrainingConfig};
