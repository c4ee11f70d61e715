// Integration tests for src/io/buffer.rs: growable packet/block buffers.

use qzip::io::{GrowableBuffer, StreamBuffers};
use qzip::packet::compress_bound;

#[test]
fn growth_is_monotonic_over_a_sequence() {
    let mut b = GrowableBuffer::with_capacity(10);
    let mut grew = Vec::new();
    for need in [5usize, 10, 11, 8, 400, 399, 1000] {
        grew.push(b.ensure_capacity(need));
        assert!(b.capacity() >= need);
    }
    assert_eq!(grew, vec![false, false, true, false, true, false, true]);
    assert_eq!(b.capacity(), 1000);
}

#[test]
fn regrowth_hands_out_a_fresh_region() {
    let mut b = GrowableBuffer::with_capacity(4);
    b.as_mut_slice().copy_from_slice(b"abcd");
    b.ensure_capacity(8);
    assert_eq!(b.as_slice(), &[0u8; 8]);
}

#[test]
fn stream_buffers_grow_independently() {
    let mut bufs = StreamBuffers::new(100);
    let packet_cap = bufs.packet.capacity();
    assert_eq!(packet_cap, compress_bound(100));

    assert!(bufs.block.ensure_capacity(5000));
    assert_eq!(bufs.packet.capacity(), packet_cap);
    assert!(bufs.packet.ensure_capacity(packet_cap + 1));
    assert_eq!(bufs.block.capacity(), 5000);
}
