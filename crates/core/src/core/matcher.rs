//! Longest-prefix matching over a growing pattern dictionary.
//!
//! Tokenization asks one question millions of times: what is the longest
//! registered pattern that starts at this position? The matcher splits the
//! answer by pattern length. Patterns of up to 8 bytes fit in a single
//! `(word, len)` hash probe; longer patterns share a bucket keyed on their
//! first 8 bytes and are verified suffix-by-suffix, longest first.

use crate::core::prefix::{load_prefix_le, load_word_le, MASKS, WORD_BYTES};
use ahash::AHashMap;

/// Mutable map from byte patterns to 16-bit ids with longest-prefix queries.
///
/// Implementations differ in the maximum admissible pattern length and in
/// how long-pattern buckets are stored; the training loop and the encoder
/// are written against this seam.
pub trait PrefixSearch {
    /// Registers `pattern` under `id` and reports whether it was admitted.
    ///
    /// Ids must be dense and ascending: the `n`-th call registers id `n`.
    /// Registering the same bytes twice under different ids leaves the first
    /// id in effect for queries. A refusal (capped variant bucket overflow)
    /// consumes no id.
    fn insert(&mut self, pattern: &[u8], id: u16) -> bool;

    /// Longest registered pattern that is a prefix of `buf`.
    ///
    /// Returns the pattern's id and length. Once the 256 single-byte
    /// patterns are registered this is `Some` for every non-empty `buf`.
    fn find_longest_match(&self, buf: &[u8]) -> Option<(u16, usize)>;

    /// Upper bound on admissible pattern length.
    fn max_pattern_len(&self) -> usize;
}

/// Longest-prefix matcher for patterns of unbounded length.
///
/// Long patterns keep their suffix bytes (everything past the first 8) in a
/// matcher-owned store indexed by id, so a bucket entry is just the id and
/// verification is one slice comparison.
pub struct PrefixMatcher {
    /// `(masked word, length)` -> id, for patterns of 1..=8 bytes
    short: AHashMap<(u64, u8), u16>,
    /// first-8-bytes word -> ids of long patterns, longest first
    buckets: AHashMap<u64, Vec<u16>>,
    /// concatenated suffixes of long patterns
    suffixes: Vec<u8>,
    /// per-id end offsets into `suffixes`; short patterns contribute empty
    /// ranges so the vector stays id-indexed
    ends: Vec<u32>,
}

impl PrefixMatcher {
    /// Creates an empty matcher.
    pub fn new() -> Self {
        Self {
            short: AHashMap::new(),
            buckets: AHashMap::new(),
            suffixes: Vec::with_capacity(1 << 20),
            ends: vec![0],
        }
    }

    #[inline]
    fn suffix(&self, id: u16) -> &[u8] {
        let start = self.ends[id as usize] as usize;
        let end = self.ends[id as usize + 1] as usize;
        &self.suffixes[start..end]
    }
}

impl PrefixSearch for PrefixMatcher {
    fn insert(&mut self, pattern: &[u8], id: u16) -> bool {
        debug_assert_eq!(
            id as usize + 1,
            self.ends.len(),
            "patterns must be registered in ascending id order"
        );

        if pattern.len() > WORD_BYTES {
            let key = load_prefix_le(pattern, WORD_BYTES);
            self.suffixes.extend_from_slice(&pattern[WORD_BYTES..]);
            self.ends.push(self.suffixes.len() as u32);

            // Place the id so the bucket stays sorted by pattern length
            // descending; equal lengths keep insertion order.
            let ends = &self.ends;
            let pattern_len = pattern.len();
            let bucket = self.buckets.entry(key).or_default();
            let pos = bucket.partition_point(|&other| {
                let other_len =
                    WORD_BYTES + (ends[other as usize + 1] - ends[other as usize]) as usize;
                other_len >= pattern_len
            });
            bucket.insert(pos, id);
        } else {
            let key = load_prefix_le(pattern, pattern.len());
            self.short.entry((key, pattern.len() as u8)).or_insert(id);
            self.ends.push(self.suffixes.len() as u32);
        }

        true
    }

    fn find_longest_match(&self, buf: &[u8]) -> Option<(u16, usize)> {
        let word = load_word_le(buf);

        // Long phase: buckets hold only patterns longer than the key, so the
        // first suffix hit is the longest match overall.
        if buf.len() > WORD_BYTES {
            if let Some(bucket) = self.buckets.get(&word) {
                let tail = &buf[WORD_BYTES..];
                for &id in bucket {
                    let suffix = self.suffix(id);
                    if tail.starts_with(suffix) {
                        return Some((id, WORD_BYTES + suffix.len()));
                    }
                }
            }
        }

        // Short phase: probe lengths 8 down to 1.
        for len in (1..=buf.len().min(WORD_BYTES)).rev() {
            let key = word & MASKS[len];
            if let Some(&id) = self.short.get(&(key, len as u8)) {
                return Some((id, len));
            }
        }

        None
    }

    fn max_pattern_len(&self) -> usize {
        usize::MAX
    }
}

impl Default for PrefixMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> PrefixMatcher {
        let mut matcher = PrefixMatcher::new();
        for byte in 0..=255u8 {
            matcher.insert(&[byte], byte as u16);
        }
        matcher
    }

    #[test]
    fn test_single_byte_fallback() {
        let matcher = seeded();
        assert_eq!(matcher.find_longest_match(b"z"), Some((b'z' as u16, 1)));
        assert_eq!(matcher.find_longest_match(&[0x00, 0x01]), Some((0, 1)));
    }

    #[test]
    fn test_empty_buffer_has_no_match() {
        let matcher = seeded();
        assert_eq!(matcher.find_longest_match(b""), None);
    }

    #[test]
    fn test_prefers_longest_short_pattern() {
        let mut matcher = seeded();
        matcher.insert(b"ab", 256);
        matcher.insert(b"abcd", 257);
        assert_eq!(matcher.find_longest_match(b"abcdef"), Some((257, 4)));
        assert_eq!(matcher.find_longest_match(b"abx"), Some((256, 2)));
    }

    #[test]
    fn test_long_patterns_beat_short_ones() {
        let mut matcher = seeded();
        matcher.insert(b"identifie", 256);
        matcher.insert(b"identifier_long", 257);
        assert_eq!(
            matcher.find_longest_match(b"identifier_long_tail"),
            Some((257, 15))
        );
        assert_eq!(matcher.find_longest_match(b"identifiers"), Some((256, 9)));
    }

    #[test]
    fn test_long_pattern_requires_full_suffix() {
        let mut matcher = seeded();
        matcher.insert(b"prefix_and_more", 256);
        // Shares the first 8 bytes but diverges in the suffix.
        assert_eq!(
            matcher.find_longest_match(b"prefix_another"),
            Some((b'p' as u16, 1))
        );
    }

    #[test]
    fn test_match_never_exceeds_buffer() {
        let mut matcher = seeded();
        matcher.insert(b"0123456789abc", 256);
        // The buffer is a strict prefix of the pattern.
        assert_eq!(
            matcher.find_longest_match(b"0123456789"),
            Some((b'0' as u16, 1))
        );
    }

    #[test]
    fn test_duplicate_pattern_keeps_first_id() {
        let mut matcher = seeded();
        matcher.insert(b"dup", 256);
        matcher.insert(b"dup", 257);
        assert_eq!(matcher.find_longest_match(b"dup"), Some((256, 3)));
    }
}
