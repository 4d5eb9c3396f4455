//! High-level compressor API.
//!
//! A `StringCompressor` owns the three products of compression: the token
//! arena (dictionary contents), the compressed stream of 16-bit token ids,
//! and the per-string boundary array. Training and encoding populate them;
//! decompression replays arena slices. An instance compresses one corpus and
//! is exclusively owned for its lifetime.

use tokzip_core::{PrefixMatcher, PrefixMatcher16, PrefixSearch, TokenArena};
use tokzip_training::{DictionaryTrainer, TrainingConfig};

/// Which dictionary policy a compressor trains with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryKind {
    /// Token length bounded only by the sequence of promotions.
    Unbounded,
    /// Tokens capped at 16 bytes; denser matcher representation.
    Capped16,
}

impl DictionaryKind {
    /// Maximum token length this policy admits.
    pub fn max_token_len(&self) -> usize {
        match self {
            DictionaryKind::Unbounded => usize::MAX,
            DictionaryKind::Capped16 => PrefixMatcher16::MAX_PATTERN_LEN,
        }
    }
}

/// Compressor for collections of short strings.
///
/// Learns a 16-bit token dictionary from the corpus itself, then re-encodes
/// every string as a span of token ids. String `i`'s ids live at
/// `stream[bounds[i]..bounds[i + 1]]` and decode by concatenating the
/// corresponding arena slices.
pub struct StringCompressor {
    kind: DictionaryKind,
    tokens: TokenArena,
    stream: Vec<u16>,
    bounds: Vec<usize>,
    training: TrainingConfig,
}

impl StringCompressor {
    /// Creates an empty compressor with no pre-allocation.
    pub fn new(kind: DictionaryKind) -> Self {
        Self {
            kind,
            tokens: TokenArena::new(),
            stream: Vec::new(),
            bounds: Vec::new(),
            training: TrainingConfig::default(),
        }
    }

    /// Creates a compressor with capacity hints.
    ///
    /// `num_strings` and `total_bytes` are the expected corpus shape; the
    /// internal arrays are reserved accordingly so compression does not
    /// reallocate on the common path.
    pub fn with_capacity(kind: DictionaryKind, num_strings: usize, total_bytes: usize) -> Self {
        Self {
            kind,
            tokens: TokenArena::with_capacity(2 * 1024 * 1024),
            stream: Vec::with_capacity(total_bytes),
            bounds: Vec::with_capacity(num_strings + 1),
            training: TrainingConfig::default(),
        }
    }

    /// Replaces the training configuration (seed, threshold override).
    pub fn with_training_config(mut self, config: TrainingConfig) -> Self {
        self.training = config;
        self
    }

    /// Compresses a collection of strings.
    ///
    /// Convenience wrapper that flattens the strings into the internal
    /// representation and delegates to [`compress_bytes`].
    ///
    /// [`compress_bytes`]: StringCompressor::compress_bytes
    pub fn compress_strings<S: AsRef<[u8]>>(&mut self, strings: &[S]) {
        let (data, ends) = flatten_strings(strings);
        self.compress_bytes(&data, &ends);
    }

    /// Compresses pre-flattened byte data without copying it.
    ///
    /// `ends` is a prefix-sum boundary array starting with 0: string `i`
    /// occupies `data[ends[i]..ends[i + 1]]` and the last element equals
    /// `data.len()`. Violating this is a contract breach; it is checked in
    /// debug builds only.
    pub fn compress_bytes(&mut self, data: &[u8], ends: &[usize]) {
        debug_assert!(boundaries_are_valid(ends, data.len()));
        debug_assert!(self.tokens.is_empty(), "a compressor compresses one corpus");

        let trainer = DictionaryTrainer::new(self.training.clone());
        match self.kind {
            DictionaryKind::Unbounded => {
                let matcher: PrefixMatcher = trainer.train(data, ends, &mut self.tokens);
                self.encode(data, ends, &matcher);
            }
            DictionaryKind::Capped16 => {
                let matcher: PrefixMatcher16 = trainer.train(data, ends, &mut self.tokens);
                self.encode(data, ends, &matcher);
            }
        }
    }

    /// Greedily re-parses every string through the trained matcher.
    ///
    /// Deterministic given the dictionary; all randomness lives in training.
    fn encode<M: PrefixSearch>(&mut self, data: &[u8], ends: &[usize], matcher: &M) {
        self.bounds.push(0);

        for window in ends.windows(2) {
            let (start, end) = (window[0], window[1]);
            if start == end {
                self.bounds.push(self.stream.len());
                continue;
            }

            let mut pos = start;
            while pos < end {
                let (id, len) = matcher
                    .find_longest_match(&data[pos..end])
                    .expect("trained dictionary covers every input byte");
                self.stream.push(id);
                pos += len;
            }

            self.bounds.push(self.stream.len());
        }
    }

    /// Decompresses string `index` into `buffer`, returning the byte count.
    ///
    /// The buffer must hold at least [`decompressed_len`]`(index)` bytes; a
    /// shorter buffer panics.
    ///
    /// [`decompressed_len`]: StringCompressor::decompressed_len
    pub fn decompress_string(&self, index: usize, buffer: &mut [u8]) -> usize {
        let mut written = 0;
        for &id in &self.stream[self.bounds[index]..self.bounds[index + 1]] {
            let token = self.tokens.token(id);
            buffer[written..written + token.len()].copy_from_slice(token);
            written += token.len();
        }
        written
    }

    /// Decompresses the whole corpus, concatenated, into `buffer`.
    pub fn decompress_all(&self, buffer: &mut [u8]) -> usize {
        let mut written = 0;
        for &id in &self.stream {
            let token = self.tokens.token(id);
            buffer[written..written + token.len()].copy_from_slice(token);
            written += token.len();
        }
        written
    }

    /// Decoded length of string `index` in bytes.
    pub fn decompressed_len(&self, index: usize) -> usize {
        self.stream[self.bounds[index]..self.bounds[index + 1]]
            .iter()
            .map(|&id| self.tokens.token_len(id))
            .sum()
    }

    /// Decoded length of the whole corpus in bytes.
    pub fn total_decompressed_len(&self) -> usize {
        self.stream
            .iter()
            .map(|&id| self.tokens.token_len(id))
            .sum()
    }

    /// Total bytes held by the internal arrays.
    pub fn space_used(&self) -> usize {
        self.stream.len() * std::mem::size_of::<u16>()
            + self.bounds.len() * std::mem::size_of::<usize>()
            + self.tokens.space_used()
    }

    /// Releases excess capacity in all internal arrays.
    pub fn shrink_to_fit(&mut self) {
        self.stream.shrink_to_fit();
        self.bounds.shrink_to_fit();
        self.tokens.shrink_to_fit();
    }

    /// Dictionary policy this compressor was built with.
    pub fn kind(&self) -> DictionaryKind {
        self.kind
    }

    /// Number of compressed strings.
    pub fn num_strings(&self) -> usize {
        self.bounds.len().saturating_sub(1)
    }

    /// Number of tokens in the dictionary.
    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// The token dictionary.
    pub fn tokens(&self) -> &TokenArena {
        &self.tokens
    }

    /// The compressed stream of token ids.
    pub fn token_stream(&self) -> &[u16] {
        &self.stream
    }

    /// Per-string end offsets into the token stream.
    pub fn string_bounds(&self) -> &[usize] {
        &self.bounds
    }

    /// Rebuilds a compressor from persisted state (artifact loading).
    ///
    /// The result is decode-only: the matcher is a training-time structure
    /// and is not part of the persisted state.
    pub(crate) fn from_parts(
        kind: DictionaryKind,
        tokens: TokenArena,
        stream: Vec<u16>,
        bounds: Vec<usize>,
    ) -> Self {
        Self {
            kind,
            tokens,
            stream,
            bounds,
            training: TrainingConfig::default(),
        }
    }
}

/// Flattens strings into one byte buffer plus a prefix-sum boundary array.
fn flatten_strings<S: AsRef<[u8]>>(strings: &[S]) -> (Vec<u8>, Vec<usize>) {
    let total_len: usize = strings.iter().map(|s| s.as_ref().len()).sum();
    let mut data = Vec::with_capacity(total_len);
    let mut ends = Vec::with_capacity(strings.len() + 1);

    ends.push(0);
    for string in strings {
        data.extend_from_slice(string.as_ref());
        ends.push(data.len());
    }

    (data, ends)
}

fn boundaries_are_valid(ends: &[usize], data_len: usize) -> bool {
    !ends.is_empty()
        && ends[0] == 0
        && ends.last() == Some(&data_len)
        && ends.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_strings() {
        let (data, ends) = flatten_strings(&[b"ab".as_slice(), b"", b"cde"]);
        assert_eq!(data, b"abcde");
        assert_eq!(ends, vec![0, 2, 2, 5]);
    }

    #[test]
    fn test_boundaries_validation() {
        assert!(boundaries_are_valid(&[0], 0));
        assert!(boundaries_are_valid(&[0, 3, 3, 5], 5));
        assert!(!boundaries_are_valid(&[], 0));
        assert!(!boundaries_are_valid(&[0, 4, 2], 2));
        assert!(!boundaries_are_valid(&[0, 3], 5));
    }

    #[test]
    fn test_empty_corpus() {
        let mut compressor = StringCompressor::new(DictionaryKind::Unbounded);
        compressor.compress_strings::<&[u8]>(&[]);
        assert_eq!(compressor.num_strings(), 0);
        assert_eq!(compressor.num_tokens(), 256);
        assert!(compressor.token_stream().is_empty());
        assert_eq!(compressor.string_bounds(), &[0]);
    }

    #[test]
    fn test_single_empty_string() {
        let mut compressor = StringCompressor::new(DictionaryKind::Unbounded);
        compressor.compress_strings(&[b"".as_slice()]);
        assert_eq!(compressor.num_strings(), 1);
        assert!(compressor.token_stream().is_empty());
        assert_eq!(compressor.string_bounds(), &[0, 0]);
        assert_eq!(compressor.decompressed_len(0), 0);
    }

    #[test]
    fn test_space_used_accounts_all_arrays() {
        let mut compressor = StringCompressor::new(DictionaryKind::Unbounded);
        compressor.compress_strings(&[b"abc".as_slice()]);
        let expected = compressor.token_stream().len() * 2
            + compressor.string_bounds().len() * std::mem::size_of::<usize>()
            + compressor.tokens().space_used();
        assert_eq!(compressor.space_used(), expected);
    }
}
