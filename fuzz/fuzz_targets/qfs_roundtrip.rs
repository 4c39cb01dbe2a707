#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (compressed, ok) = dbpf_recompress::qfs::encode(data);
    if !ok {
        return;
    }
    let (decompressed, ok) = dbpf_recompress::qfs::decode(&compressed);
    assert!(ok, "decode failed on a buffer this crate's own encoder produced");
    assert_eq!(decompressed, data, "round-trip mismatch");
});
