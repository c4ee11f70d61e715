// Integration tests for src/io/stream_compress.rs and
// src/io/stream_decompress.rs: the packet framer.
//
// Coverage:
//   - round trips for empty, small, and multi-packet inputs
//   - walking a stream by headers alone lands exactly on its end
//   - a consumer configured with a different block size still decodes
//   - truncation anywhere in a stream is reported, never silently accepted
//   - sources that return short reads

use std::io::{self, Cursor, Read};

use qzip::io::{decode_stream, encode_stream, StreamBuffers, StreamStats};
use qzip::packet::{compressed_size, decompressed_size, HEADER_SIZE};
use qzip::{CompressState, DecompressState, Error};

fn encode(data: &[u8], block_size: usize) -> (Vec<u8>, StreamStats) {
    let mut out = Vec::new();
    let stats =
        encode_stream(&mut Cursor::new(data), &mut out, &mut CompressState::default(), block_size)
            .unwrap();
    (out, stats)
}

fn decode(stream: &[u8], initial_block: usize) -> qzip::Result<Vec<u8>> {
    let mut out = Vec::new();
    decode_stream(
        &mut Cursor::new(stream),
        &mut out,
        &mut DecompressState::default(),
        &mut StreamBuffers::new(initial_block),
    )?;
    Ok(out)
}

fn text(len: usize) -> Vec<u8> {
    let words = ["alpha ", "beta ", "gamma ", "delta ", "epsilon\n"];
    let mut out = Vec::with_capacity(len);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(words[(i * 7 + i / 3) % words.len()].as_bytes());
        i += 1;
    }
    out.truncate(len);
    out
}

/// Reader that returns at most `step` bytes per call.
struct Dribble<R> {
    inner: R,
    step: usize,
}

impl<R: Read> Read for Dribble<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.step);
        self.inner.read(&mut buf[..n])
    }
}

#[test]
fn empty_input_empty_stream() {
    let (stream, stats) = encode(b"", 4096);
    assert!(stream.is_empty());
    assert_eq!(stats.packets, 0);
    assert!(decode(&stream, 4096).unwrap().is_empty());
}

#[test]
fn small_input_single_packet() {
    let data = b"a short line of text\n";
    let (stream, stats) = encode(data, 4096);
    assert_eq!(stats.packets, 1);
    assert_eq!(decode(&stream, 4096).unwrap(), data);
}

#[test]
fn multi_megabyte_round_trip() {
    let data = text(3 * 1024 * 1024 + 17);
    let (stream, stats) = encode(&data, 1 << 20);
    assert_eq!(stats.packets, 4);
    assert!(stream.len() < data.len());
    assert_eq!(decode(&stream, 1 << 20).unwrap(), data);
}

#[test]
fn header_walk_reaches_stream_end() {
    let data = text(200_000);
    let (stream, _) = encode(&data, 30_000);

    let mut pos = 0usize;
    let mut total = 0usize;
    let mut packets = 0;
    while pos < stream.len() {
        assert!(stream.len() - pos >= HEADER_SIZE);
        total += decompressed_size(&stream[pos..]);
        pos += compressed_size(&stream[pos..]);
        packets += 1;
    }
    assert_eq!(pos, stream.len());
    assert_eq!(total, data.len());
    assert_eq!(packets, 7);
}

#[test]
fn consumer_with_smaller_buffers_grows() {
    let data = text(500_000);
    let (stream, _) = encode(&data, 256 * 1024);
    assert_eq!(decode(&stream, 1024).unwrap(), data);
}

#[test]
fn increasing_packet_sizes_decode() {
    // Concatenate packets of growing block size into one stream by hand.
    let data = text(64 * 1024 + 4 * 1024 + 256);
    let mut stream = Vec::new();
    let mut state = CompressState::default();
    let mut offset = 0;
    for block in [256usize, 4 * 1024, 64 * 1024] {
        encode_stream(
            &mut Cursor::new(&data[offset..offset + block]),
            &mut stream,
            &mut state,
            block,
        )
        .unwrap();
        offset += block;
    }
    assert_eq!(decode(&stream, 16).unwrap(), data);
}

#[test]
fn every_truncation_point_is_reported() {
    let data = text(20_000);
    let (stream, _) = encode(&data, 5_000);

    // Packet boundaries are clean ends; everything else must be an error.
    let mut boundaries = vec![0usize];
    let mut pos = 0;
    while pos < stream.len() {
        pos += compressed_size(&stream[pos..]);
        boundaries.push(pos);
    }

    for cut in (0..stream.len()).step_by(97) {
        let result = decode(&stream[..cut], 5_000);
        if boundaries.contains(&cut) {
            assert!(result.is_ok(), "cut at packet boundary {cut}");
        } else {
            assert!(
                matches!(result, Err(Error::TruncatedStream { .. })),
                "cut at {cut} should be a truncation"
            );
        }
    }
}

#[test]
fn short_reads_on_both_sides() {
    let data = text(50_000);
    let mut stream = Vec::new();
    encode_stream(
        &mut Dribble { inner: Cursor::new(&data), step: 333 },
        &mut stream,
        &mut CompressState::default(),
        8_192,
    )
    .unwrap();
    assert_eq!(qzip::packet::decompressed_size(&stream), 8_192, "blocks are filled fully");

    let mut out = Vec::new();
    decode_stream(
        &mut Dribble { inner: Cursor::new(&stream), step: 5 },
        &mut out,
        &mut DecompressState::default(),
        &mut StreamBuffers::new(8_192),
    )
    .unwrap();
    assert_eq!(out, data);
}

#[test]
fn garbage_is_rejected() {
    let garbage = vec![0u8; 64];
    assert!(matches!(decode(&garbage, 1024), Err(Error::CorruptPacket(_))));
}

#[test]
fn tiny_packet_claiming_gigabytes_leaves_buffers_alone() {
    let config = qzip::CodecConfig::default();
    let header = qzip::packet::PacketHeader {
        compressed: true,
        level: config.level(),
        stream_class: config.stream_class(),
        total_size: (HEADER_SIZE + 8) as u32,
        decompressed_size: 0xFFFF_FF00,
    };
    let mut stream = header.encode().to_vec();
    stream.extend_from_slice(&[0u8; 8]);

    let mut bufs = StreamBuffers::new(1024);
    let before = (bufs.packet.capacity(), bufs.block.capacity());
    let err = decode_stream(
        &mut Cursor::new(&stream),
        &mut Vec::new(),
        &mut DecompressState::default(),
        &mut bufs,
    )
    .unwrap_err();
    assert!(matches!(err, Error::CorruptPacket(_)), "{err:?}");
    assert_eq!((bufs.packet.capacity(), bufs.block.capacity()), before);
}
