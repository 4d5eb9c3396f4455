//! Basic usage: compress a small corpus with both dictionary policies,
//! verify the round trip, and print space figures.

use tokzip::{DictionaryKind, StringCompressor};

fn main() {
    let strings: Vec<String> = (0..1000)
        .map(|i| format!("https://example.com/products/category-{}/item-{}", i % 7, i))
        .collect();
    let raw_bytes: usize = strings.iter().map(|s| s.len()).sum();

    for kind in [DictionaryKind::Unbounded, DictionaryKind::Capped16] {
        let mut compressor = StringCompressor::with_capacity(kind, strings.len(), raw_bytes);
        compressor.compress_strings(&strings);
        compressor.shrink_to_fit();

        // Every string must decode back to its original bytes.
        for (i, original) in strings.iter().enumerate() {
            let mut buffer = vec![0u8; compressor.decompressed_len(i)];
            let len = compressor.decompress_string(i, &mut buffer);
            assert_eq!(&buffer[..len], original.as_bytes());
        }

        println!("{:?}:", kind);
        println!("  strings:      {}", compressor.num_strings());
        println!("  tokens:       {}", compressor.num_tokens());
        println!("  raw bytes:    {}", raw_bytes);
        println!("  space used:   {}", compressor.space_used());
        println!(
            "  ratio:        {:.3}",
            compressor.space_used() as f64 / raw_bytes as f64
        );
    }
}
