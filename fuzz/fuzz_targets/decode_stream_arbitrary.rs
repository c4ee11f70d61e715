#![no_main]
use libfuzzer_sys::fuzz_target;

use qzip::io::{decode_stream, StreamBuffers};
use qzip::DecompressState;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail cleanly; never panic, overrun, or
    // allocate far beyond what the input actually carries.
    let mut sink = Vec::new();
    let _ = decode_stream(
        &mut &data[..],
        &mut sink,
        &mut DecompressState::default(),
        &mut StreamBuffers::new(1024),
    );
});
