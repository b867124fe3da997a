//! Fuzzing entry points for fuzzcache-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_unquote

use std::path::Path;

pub fn fuzz_unquote(data: &[u8]) {
    use fuzzcache_core::quote::decode_bytes;

    // Try to decode - should never panic
    let _ = decode_bytes(data);
}

pub fn fuzz_round_trip(data: &[u8]) {
    use fuzzcache_core::quote::{decode, encode};

    let encoded = encode(data);
    assert_eq!(decode(&encoded).as_deref(), Ok(data));
}

pub fn fuzz_native_entry(data: &[u8]) {
    use fuzzcache_core::native::parse_entry;

    // Any content parses to a seed, nothing, or an error - never a panic
    let _ = parse_entry(data, Path::new("fuzz-input"));
}

pub fn fuzz_corpus(data: &[u8]) {
    use fuzzcache_core::corpus::{read_corpus, write_corpus};

    let Ok(seeds) = read_corpus(data, Path::new("fuzz-input.fuzz")) else {
        return;
    };

    // Rewriting a parsed corpus is stable
    let mut first = Vec::new();
    write_corpus(&mut first, &seeds).unwrap();
    let reparsed = read_corpus(&first[..], Path::new("rewritten.fuzz")).unwrap();
    let mut second = Vec::new();
    write_corpus(&mut second, &reparsed).unwrap();
    assert_eq!(first, second);
}
