//! Core compression data structures.
//!
//! This module contains the token arena and the two longest-prefix matcher
//! variants that the trainer and encoder are built on.

pub mod arena;
pub mod matcher;
pub mod matcher16;
pub mod prefix;

pub use arena::{TokenArena, MAX_TOKEN_ID, SEED_TOKENS};
pub use matcher::{PrefixMatcher, PrefixSearch};
pub use matcher16::{PrefixMatcher16, BUCKET_MAX};
