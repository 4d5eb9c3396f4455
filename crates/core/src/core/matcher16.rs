//! Longest-prefix matcher for 16-byte-capped patterns.
//!
//! With patterns capped at 16 bytes a long pattern's suffix always fits in
//! one word, so bucket entries carry the suffix inline and verification is a
//! pair of bitwise operations instead of a memory comparison. The price is a
//! hard bucket capacity: once a bucket is full, further insertions under
//! that 8-byte prefix are refused.

use crate::core::matcher::PrefixSearch;
use crate::core::prefix::{is_word_prefix, load_prefix_le, load_word_le, MASKS, WORD_BYTES};
use ahash::AHashMap;

/// Hard capacity of a long-pattern bucket.
pub const BUCKET_MAX: usize = 128;

/// One long pattern: its suffix word, suffix length, and id.
#[derive(Debug, Clone, Copy)]
struct BucketEntry {
    suffix: u64,
    suffix_len: u8,
    id: u16,
}

/// Longest-prefix matcher for patterns of at most 16 bytes.
pub struct PrefixMatcher16 {
    /// `(masked word, length)` -> id, for patterns of 1..=8 bytes
    short: AHashMap<(u64, u8), u16>,
    /// first-8-bytes word -> inline suffix entries, longest first
    buckets: AHashMap<u64, Vec<BucketEntry>>,
}

impl PrefixMatcher16 {
    /// Maximum admissible pattern length.
    pub const MAX_PATTERN_LEN: usize = 16;

    /// Creates an empty matcher.
    pub fn new() -> Self {
        Self {
            short: AHashMap::new(),
            buckets: AHashMap::new(),
        }
    }
}

impl PrefixSearch for PrefixMatcher16 {
    fn insert(&mut self, pattern: &[u8], id: u16) -> bool {
        debug_assert!(pattern.len() <= Self::MAX_PATTERN_LEN);

        if pattern.len() <= WORD_BYTES {
            let key = load_prefix_le(pattern, pattern.len());
            self.short.entry((key, pattern.len() as u8)).or_insert(id);
            return true;
        }

        let key = load_prefix_le(pattern, WORD_BYTES);
        let bucket = self.buckets.entry(key).or_default();
        if bucket.len() >= BUCKET_MAX {
            return false;
        }

        let suffix_len = (pattern.len() - WORD_BYTES) as u8;
        let suffix = load_prefix_le(&pattern[WORD_BYTES..], suffix_len as usize);
        // Keep the bucket sorted by suffix length descending; equal lengths
        // keep insertion order.
        let pos = bucket.partition_point(|entry| entry.suffix_len >= suffix_len);
        bucket.insert(
            pos,
            BucketEntry {
                suffix,
                suffix_len,
                id,
            },
        );
        true
    }

    fn find_longest_match(&self, buf: &[u8]) -> Option<(u16, usize)> {
        let word = load_word_le(buf);

        // Long phase: compare the next up-to-8 input bytes against each
        // stored suffix word, longest entry first.
        if buf.len() > WORD_BYTES {
            let tail_len = buf.len().min(Self::MAX_PATTERN_LEN) - WORD_BYTES;
            let tail = load_prefix_le(&buf[WORD_BYTES..], tail_len);
            if let Some(bucket) = self.buckets.get(&word) {
                for entry in bucket {
                    if is_word_prefix(tail, entry.suffix, tail_len, entry.suffix_len as usize) {
                        return Some((entry.id, WORD_BYTES + entry.suffix_len as usize));
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
        Self::MAX_PATTERN_LEN
    }
}

impl Default for PrefixMatcher16 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> PrefixMatcher16 {
        let mut matcher = PrefixMatcher16::new();
        for byte in 0..=255u8 {
            matcher.insert(&[byte], byte as u16);
        }
        matcher
    }

    #[test]
    fn test_single_byte_fallback() {
        let matcher = seeded();
        assert_eq!(matcher.find_longest_match(b"q"), Some((b'q' as u16, 1)));
    }

    #[test]
    fn test_prefers_longest_pattern() {
        let mut matcher = seeded();
        assert!(matcher.insert(b"requests_", 256));
        assert!(matcher.insert(b"requests_total", 257));
        assert_eq!(
            matcher.find_longest_match(b"requests_total_5xx"),
            Some((257, 14))
        );
        assert_eq!(matcher.find_longest_match(b"requests__"), Some((256, 9)));
    }

    #[test]
    fn test_suffix_must_fit_in_input() {
        let mut matcher = seeded();
        matcher.insert(b"0123456789abcdef", 256);
        // Eleven input bytes cannot carry a 16-byte pattern.
        assert_eq!(
            matcher.find_longest_match(b"0123456789a"),
            Some((b'0' as u16, 1))
        );
        assert_eq!(
            matcher.find_longest_match(b"0123456789abcdef"),
            Some((256, 16))
        );
    }

    #[test]
    fn test_bucket_overflow_is_refused() {
        let mut matcher = seeded();
        // All patterns share the same 8-byte prefix; lengths 9..=16 cycle so
        // every entry is distinct.
        let mut id = 256u16;
        let mut admitted = 0usize;
        'fill: for a in 0..=255u8 {
            for b in 0..=255u8 {
                let mut pattern = b"prefix__".to_vec();
                pattern.push(a);
                pattern.push(b);
                if !matcher.insert(&pattern, id) {
                    break 'fill;
                }
                admitted += 1;
                id += 1;
            }
        }
        assert_eq!(admitted, BUCKET_MAX);
        // Refusal leaves previously admitted entries intact.
        assert_eq!(
            matcher.find_longest_match(b"prefix__\x00\x00rest"),
            Some((256, 10))
        );
    }

    #[test]
    fn test_short_patterns_unaffected_by_cap() {
        let mut matcher = seeded();
        assert!(matcher.insert(b"abc", 256));
        assert_eq!(matcher.find_longest_match(b"abcd"), Some((256, 3)));
    }
}
