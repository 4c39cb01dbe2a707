//! End-to-end coverage of the QFS/RefPack codec through the public API.

use dbpf_recompress::qfs::{decode, encode};

#[test]
fn round_trips_plain_text() {
    let src = b"the quick brown fox jumps over the lazy dog".repeat(8);
    let (compressed, ok) = encode(&src);
    assert!(ok);
    let (decompressed, ok) = decode(&compressed);
    assert!(ok);
    assert_eq!(decompressed, src);
}

#[test]
fn round_trips_binary_data_with_runs() {
    let mut src = Vec::new();
    for i in 0..2000u32 {
        src.push((i % 7) as u8);
    }
    let (compressed, ok) = encode(&src);
    assert!(ok);
    let (decompressed, ok) = decode(&compressed);
    assert!(ok);
    assert_eq!(decompressed, src);
}

#[test]
fn compresses_highly_redundant_data_well() {
    let src = vec![0u8; 4096];
    let (compressed, ok) = encode(&src);
    assert!(ok);
    assert!(compressed.len() <= 30, "expected <=30 bytes, got {}", compressed.len());
}

#[test]
fn abandons_incompressible_random_data() {
    // A xorshift PRNG stream has no exploitable redundancy at this size.
    let mut state: u64 = 0x9E3779B97F4A7C15;
    let mut src = Vec::with_capacity(8192);
    for _ in 0..8192 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        src.push((state & 0xFF) as u8);
    }
    let (_out, ok) = encode(&src);
    assert!(!ok);
}

#[test]
fn decode_rejects_malformed_frame() {
    let (_dst, ok) = decode(&[1, 2, 3]);
    assert!(!ok);
}
