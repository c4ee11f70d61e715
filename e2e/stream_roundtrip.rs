// e2e/stream_roundtrip.rs: whole-stream behaviour through the public API.
//
// Covers the packet layout a consumer can rely on, cross-packet history,
// stored fallback for incompressible data, and configuration mismatches.

use std::io::Cursor;

use qzip::config::{COMPRESSION_LEVEL, STREAMING_BUFFER};
use qzip::io::{process_stream, StreamBuffers};
use qzip::packet::{PacketHeader, HEADER_SIZE};
use qzip::{
    decode_stream, encode_stream, CodecConfig, CompressState, DecompressState, Error, Mode, Prefs,
};

/// Deterministic bytes with no exploitable redundancy.
fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut x = seed | 1;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x >> 24) as u8
        })
        .collect()
}

fn headers(stream: &[u8]) -> Vec<PacketHeader> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < stream.len() {
        let h = PacketHeader::parse(&stream[pos..]).unwrap();
        pos += h.total_size as usize;
        out.push(h);
    }
    assert_eq!(pos, stream.len());
    out
}

fn round_trip(data: &[u8], block: usize) -> Vec<u8> {
    let prefs = Prefs::default();
    let mut packed = Vec::new();
    let mut state = CompressState::default();
    encode_stream(&mut Cursor::new(data), &mut packed, &mut state, block).unwrap();

    let mut restored = Vec::new();
    process_stream(Mode::Decompress, &mut Cursor::new(&packed), &mut restored, &prefs).unwrap();
    assert_eq!(restored, data);
    packed
}

#[test]
fn empty_input_produces_no_packets() {
    let packed = round_trip(b"", 4096);
    assert!(packed.is_empty());
}

#[test]
fn run_of_one_byte_is_a_single_small_packet() {
    let data = vec![b'A'; 10_000];
    let packed = round_trip(&data, 1 << 20);
    let hs = headers(&packed);
    assert_eq!(hs.len(), 1);
    assert!(hs[0].compressed);
    assert_eq!(hs[0].decompressed_size, 10_000);
    assert_eq!(hs[0].level, COMPRESSION_LEVEL);
    assert!(packed.len() < 200);
}

#[test]
fn incompressible_block_is_stored() {
    let data = noise(100_000, 0x9e37_79b9);
    let packed = round_trip(&data, 1 << 20);
    let hs = headers(&packed);
    assert_eq!(hs.len(), 1);
    assert!(!hs[0].compressed);
    assert_eq!(packed.len(), data.len() + HEADER_SIZE);
    assert_eq!(&packed[HEADER_SIZE..], &data[..]);
}

#[test]
fn later_packets_reuse_earlier_history() {
    let chunk = noise(8 * 1024, 42);
    let data = [chunk.clone(), chunk].concat();
    let packed = round_trip(&data, 8 * 1024);
    let hs = headers(&packed);
    assert_eq!(hs.len(), 2);
    assert!(!hs[0].compressed);
    assert!(hs[1].compressed);
    assert!((hs[1].total_size as usize) < 512);
}

#[test]
fn packet_sizes_follow_block_size() {
    let data = noise(50_000, 7);
    let packed = round_trip(&data, 16_384);
    let sizes: Vec<u32> = headers(&packed).iter().map(|h| h.decompressed_size).collect();
    assert_eq!(sizes, vec![16_384, 16_384, 16_384, 848]);
}

#[test]
fn mismatched_level_is_refused() {
    let other_level = if COMPRESSION_LEVEL == 1 { 2 } else { 1 };
    let config = CodecConfig::new(other_level, STREAMING_BUFFER).unwrap();
    let mut packed = Vec::new();
    encode_stream(
        &mut Cursor::new(&vec![b'z'; 5000]),
        &mut packed,
        &mut CompressState::new(config),
        4096,
    )
    .unwrap();

    let err = decode_stream(
        &mut Cursor::new(&packed),
        &mut Vec::new(),
        &mut DecompressState::default(),
        &mut StreamBuffers::new(4096),
    )
    .unwrap_err();
    match err {
        Error::ConfigMismatch {
            expected_level,
            found_level,
            ..
        } => {
            assert_eq!(expected_level, COMPRESSION_LEVEL);
            assert_eq!(found_level, other_level);
        }
        other => panic!("expected ConfigMismatch, got {other:?}"),
    }
}

#[test]
fn matching_custom_config_round_trips() {
    let config = CodecConfig::new(1, 50_000).unwrap();
    let data = [noise(20_000, 3), noise(20_000, 3)].concat();
    let mut packed = Vec::new();
    encode_stream(&mut Cursor::new(&data), &mut packed, &mut CompressState::new(config), 20_000)
        .unwrap();

    let mut out = Vec::new();
    decode_stream(
        &mut Cursor::new(&packed),
        &mut out,
        &mut DecompressState::new(config),
        &mut StreamBuffers::new(1024),
    )
    .unwrap();
    assert_eq!(out, data);
}

#[test]
fn compress_mode_then_decompress_mode() {
    let prefs = Prefs::default();
    let data: Vec<u8> = (0..2_500_000u32).map(|i| (i % 251) as u8 ^ (i / 4096) as u8).collect();

    let mut packed = Vec::new();
    let stats = process_stream(Mode::Compress, &mut Cursor::new(&data), &mut packed, &prefs).unwrap();
    assert_eq!(stats.bytes_in, data.len() as u64);
    assert_eq!(stats.bytes_out, packed.len() as u64);
    assert_eq!(stats.packets, 3);

    let mut out = Vec::new();
    process_stream(Mode::DecompressToStdout, &mut Cursor::new(&packed), &mut out, &prefs).unwrap();
    assert_eq!(out, data);
}
