//! Online dictionary trainer.
//!
//! A single pass over the corpus interleaves longest-prefix tokenization
//! with frequency-triggered promotion: every adjacent token pair is counted,
//! and a pair that reaches the promotion threshold becomes a new token on
//! the spot. Later strings are then tokenized against the grown dictionary,
//! so promotions compound without a second pass.

use ahash::AHashMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokzip_core::{PrefixSearch, TokenArena, MAX_TOKEN_ID};

/// An ordered pair of adjacent token ids.
///
/// Order matters: `(a, b)` and `(b, a)` accumulate separately.
pub type Pair = (u16, u16);

/// Configuration for dictionary training.
#[derive(Debug, Clone, Default)]
pub struct TrainingConfig {
    /// RNG seed for the shuffled training walk. `None` (the default) seeds
    /// from OS entropy; fixing it makes a training run reproducible.
    pub seed: Option<u64>,
    /// Explicit promotion threshold. `None` derives it from the corpus size
    /// as `max(log2(MiB), 2)`.
    pub threshold: Option<u32>,
}

/// Dictionary trainer.
///
/// Builds a token dictionary of up to 65536 entries from a flattened corpus
/// and returns a matcher whose domain is exactly that dictionary. The arena
/// passed in receives every token's content in id order.
pub struct DictionaryTrainer {
    config: TrainingConfig,
}

impl DictionaryTrainer {
    /// Creates a trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Trains a dictionary over `data`, whose strings end at `ends[1..]`.
    ///
    /// `ends` is a prefix-sum boundary array: `ends[0] == 0`, string `i`
    /// occupies `data[ends[i]..ends[i + 1]]`, and the last element equals
    /// `data.len()`. The arena must be empty; it is seeded with the 256
    /// single-byte tokens before the walk starts.
    pub fn train<M>(&self, data: &[u8], ends: &[usize], tokens: &mut TokenArena) -> M
    where
        M: PrefixSearch + Default,
    {
        debug_assert!(tokens.is_empty(), "training reuses a fresh arena");
        debug_assert!(!ends.is_empty() && ends[0] == 0);
        debug_assert!(ends.last() == Some(&data.len()));
        debug_assert!(ends.windows(2).all(|w| w[0] <= w[1]));

        let mut matcher = M::default();
        let mut frequency: AHashMap<Pair, u32> = AHashMap::new();
        let mut next_id: u16 = 256;

        // Seed ids 0..=255 with the single-byte tokens so every input byte
        // has a match from the first query on.
        for byte in 0..=255u8 {
            matcher.insert(&[byte], byte as u16);
            let id = tokens.push(&[byte]);
            debug_assert_eq!(id, byte as u16);
        }

        let threshold = self
            .config
            .threshold
            .unwrap_or_else(|| promotion_threshold(data.len()));

        // Visit strings in random order; a fixed scan order would bias the
        // dictionary toward the prefixes of early strings.
        let mut order: Vec<usize> = (0..ends.len() - 1).collect();
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        order.shuffle(&mut rng);

        let max_len = matcher.max_pattern_len();

        'walk: for &index in &order {
            let end = ends[index + 1];
            let mut pos = ends[index];
            if pos == end {
                continue;
            }

            // The first token of a string has no predecessor and counts no
            // pair.
            let (first_id, first_len) = matcher
                .find_longest_match(&data[pos..end])
                .expect("single-byte tokens cover every input byte");
            let mut prev_id = first_id;
            let mut prev_len = first_len;
            pos += prev_len;

            while pos < end {
                let (cur_id, cur_len) = matcher
                    .find_longest_match(&data[pos..end])
                    .expect("single-byte tokens cover every input byte");

                let mut promoted = false;
                if prev_len + cur_len <= max_len {
                    let pair = (prev_id, cur_id);
                    let count = {
                        let entry = frequency.entry(pair).or_insert(0);
                        *entry += 1;
                        *entry
                    };

                    if count >= threshold {
                        // The pair's bytes sit contiguously in the source
                        // window, so the merged token is a single slice.
                        let merged = &data[pos - prev_len..pos + cur_len];
                        if matcher.insert(merged, next_id) {
                            let id = tokens.push(merged);
                            debug_assert_eq!(id, next_id);
                            frequency.remove(&pair);
                            prev_id = next_id;
                            prev_len += cur_len;
                            promoted = true;

                            if next_id == MAX_TOKEN_ID {
                                // Dictionary full; stop training early.
                                break 'walk;
                            }
                            next_id += 1;
                        }
                        // A refused insertion keeps the counter, so the pair
                        // retries on its next observation.
                    }
                }

                if !promoted {
                    prev_id = cur_id;
                    prev_len = cur_len;
                }
                pos += cur_len;
            }
        }

        matcher
    }
}

impl Default for DictionaryTrainer {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

/// Pair-occurrence count required before a pair becomes a token.
///
/// Scales with corpus size so small corpora do not promote rare pairs:
/// `max(log2(MiB), 2)`.
fn promotion_threshold(total_bytes: usize) -> u32 {
    let mib = total_bytes as f64 / (1024.0 * 1024.0);
    mib.log2().max(2.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokzip_core::{PrefixMatcher, PrefixMatcher16};

    fn flatten(strings: &[&[u8]]) -> (Vec<u8>, Vec<usize>) {
        let mut data = Vec::new();
        let mut ends = vec![0];
        for s in strings {
            data.extend_from_slice(s);
            ends.push(data.len());
        }
        (data, ends)
    }

    fn seeded_trainer() -> DictionaryTrainer {
        DictionaryTrainer::new(TrainingConfig {
            seed: Some(7),
            threshold: None,
        })
    }

    #[test]
    fn test_threshold_floors_at_two() {
        assert_eq!(promotion_threshold(0), 2);
        assert_eq!(promotion_threshold(100), 2);
        assert_eq!(promotion_threshold(4 * 1024 * 1024), 2);
    }

    #[test]
    fn test_threshold_grows_with_corpus() {
        assert_eq!(promotion_threshold(8 * 1024 * 1024), 3);
        assert_eq!(promotion_threshold(1024 * 1024 * 1024), 10);
    }

    #[test]
    fn test_empty_corpus_keeps_seed_tokens_only() {
        let mut tokens = TokenArena::new();
        let _: PrefixMatcher = seeded_trainer().train(&[], &[0], &mut tokens);
        assert_eq!(tokens.len(), 256);
        for i in 0..=255u16 {
            assert_eq!(tokens.token(i), &[i as u8]);
        }
    }

    #[test]
    fn test_no_promotion_below_threshold() {
        let (data, ends) = flatten(&[b"a", b"b", b"c"]);
        let mut tokens = TokenArena::new();
        let _: PrefixMatcher = seeded_trainer().train(&data, &ends, &mut tokens);
        assert_eq!(tokens.len(), 256);
    }

    #[test]
    fn test_repeated_pair_promotes() {
        let (data, ends) = flatten(&[b"ab", b"ab"]);
        let mut tokens = TokenArena::new();
        let matcher: PrefixMatcher = seeded_trainer().train(&data, &ends, &mut tokens);
        assert_eq!(tokens.len(), 257);
        assert_eq!(tokens.token(256), b"ab");
        assert_eq!(matcher.find_longest_match(b"ab"), Some((256, 2)));
    }

    #[test]
    fn test_promotion_resets_counter() {
        // Threshold 2 and four observations of (a, b): the first two produce
        // the token, and the remaining two accumulate toward a second
        // promotion of the same bigram that never reaches the threshold.
        let (data, ends) = flatten(&[b"ab", b"ab", b"ab", b"ab"]);
        let mut tokens = TokenArena::new();
        let _: PrefixMatcher = seeded_trainer().train(&data, &ends, &mut tokens);
        // "ab" exists; once it does, later strings tokenize as one token and
        // produce no further pairs.
        assert_eq!(tokens.len(), 257);
    }

    #[test]
    fn test_capped_variant_respects_length_limit() {
        let strings: Vec<&[u8]> = std::iter::repeat(b"abcdefghijklmnopqrstuvwxyz".as_slice())
            .take(64)
            .collect();
        let (data, ends) = flatten(&strings);
        let mut tokens = TokenArena::new();
        let _: PrefixMatcher16 = seeded_trainer().train(&data, &ends, &mut tokens);
        assert!(tokens.len() > 256);
        for id in 0..tokens.len() {
            assert!(tokens.token_len(id as u16) <= 16);
        }
    }

    #[test]
    fn test_unbounded_variant_can_exceed_sixteen_bytes() {
        let strings: Vec<&[u8]> = std::iter::repeat(b"abcdefghijklmnopqrstuvwxyz".as_slice())
            .take(64)
            .collect();
        let (data, ends) = flatten(&strings);
        let mut tokens = TokenArena::new();
        let _: PrefixMatcher = seeded_trainer().train(&data, &ends, &mut tokens);
        let longest = (0..tokens.len()).map(|id| tokens.token_len(id as u16)).max();
        assert!(longest.unwrap() > 16);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let strings: Vec<&[u8]> = (0..64)
            .map(|i| if i % 2 == 0 { b"foo/bar".as_slice() } else { b"foo/baz".as_slice() })
            .collect();
        let (data, ends) = flatten(&strings);

        let mut tokens_a = TokenArena::new();
        let _: PrefixMatcher = seeded_trainer().train(&data, &ends, &mut tokens_a);
        let mut tokens_b = TokenArena::new();
        let _: PrefixMatcher = seeded_trainer().train(&data, &ends, &mut tokens_b);

        assert_eq!(tokens_a.data(), tokens_b.data());
        assert_eq!(tokens_a.ends(), tokens_b.ends());
    }
}
