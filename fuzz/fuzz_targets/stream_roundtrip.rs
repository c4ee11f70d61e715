#![no_main]
use libfuzzer_sys::fuzz_target;

use qzip::io::{decode_stream, encode_stream, StreamBuffers};
use qzip::{CompressState, DecompressState};

fuzz_target!(|data: &[u8]| {
    // First byte picks a small block size so multi-packet streams are common.
    let (block_size, payload) = match data.split_first() {
        Some((&b, rest)) => (64 + (b as usize) * 64, rest),
        None => (1024, data),
    };

    let mut packed = Vec::new();
    encode_stream(
        &mut &payload[..],
        &mut packed,
        &mut CompressState::default(),
        block_size,
    )
    .expect("encoding into a Vec cannot fail");

    let mut recovered = Vec::new();
    decode_stream(
        &mut &packed[..],
        &mut recovered,
        &mut DecompressState::default(),
        &mut StreamBuffers::new(16),
    )
    .unwrap_or_else(|e| {
        panic!(
            "stream round-trip: decoding self-encoded data failed ({} bytes in, {} packed): {e}",
            payload.len(),
            packed.len()
        )
    });

    assert_eq!(recovered, payload, "stream round-trip mismatch");
});
