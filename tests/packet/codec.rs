// Integration tests for src/packet/codec.rs: single-packet compress and
// decompress.
//
// Coverage:
//   - compressible data shrinks; incompressible data is stored verbatim
//     and never exceeds block + header
//   - later packets reference earlier ones through the shared state
//   - zero-length blocks
//   - corrupted payloads fail cleanly

use qzip::packet::{
    compress, compress_bound, decompress, CompressState, DecompressState, PacketHeader,
    HEADER_SIZE,
};
use qzip::Error;

/// Deterministic pseudo-random bytes (xorshift).
fn noise(len: usize, mut seed: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed as u8
        })
        .collect()
}

fn pack(block: &[u8], state: &mut CompressState) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(block.len())];
    let n = compress(block, &mut dst, state).unwrap();
    dst.truncate(n);
    dst
}

fn unpack(packet: &[u8], state: &mut DecompressState) -> qzip::Result<Vec<u8>> {
    let size = qzip::packet::decompressed_size(packet);
    let mut out = vec![0u8; size];
    let n = decompress(packet, &mut out, state)?;
    out.truncate(n);
    Ok(out)
}

#[test]
fn ten_thousand_a_compresses() {
    let block = vec![b'A'; 10_000];
    let packet = pack(&block, &mut CompressState::default());
    assert!(packet.len() < 10_000);
    assert!(PacketHeader::parse(&packet).unwrap().compressed);
    assert_eq!(unpack(&packet, &mut DecompressState::default()).unwrap(), block);
}

#[test]
fn incompressible_block_is_stored() {
    let block = noise(5000, 0x9E37_79B9_7F4A_7C15);
    let packet = pack(&block, &mut CompressState::default());
    assert!(packet.len() <= block.len() + HEADER_SIZE);
    let header = PacketHeader::parse(&packet).unwrap();
    if !header.compressed {
        assert_eq!(&packet[HEADER_SIZE..], &block[..]);
    }
    assert_eq!(unpack(&packet, &mut DecompressState::default()).unwrap(), block);
}

#[test]
fn second_packet_benefits_from_history() {
    let block = noise(8000, 42);

    let mut fresh = CompressState::default();
    let alone = pack(&block, &mut fresh);

    let mut warm = CompressState::default();
    let first = pack(&block, &mut warm);
    let repeat = pack(&block, &mut warm);
    assert!(repeat.len() < alone.len() / 4, "history should make the repeat tiny");

    let mut d = DecompressState::default();
    assert_eq!(unpack(&first, &mut d).unwrap(), block);
    assert_eq!(unpack(&repeat, &mut d).unwrap(), block);
}

#[test]
fn history_dependent_packet_needs_history() {
    let block = noise(8000, 7);
    let mut c = CompressState::default();
    let _first = pack(&block, &mut c);
    let repeat = pack(&block, &mut c);

    // A decoder that never saw the first packet cannot resolve the matches.
    assert!(unpack(&repeat, &mut DecompressState::default()).is_err());
}

#[test]
fn empty_block_round_trips() {
    let packet = pack(&[], &mut CompressState::default());
    assert_eq!(packet.len(), HEADER_SIZE);
    assert_eq!(qzip::packet::decompressed_size(&packet), 0);
    assert!(unpack(&packet, &mut DecompressState::default()).unwrap().is_empty());
}

#[test]
fn corrupted_payload_fails_cleanly() {
    let block = b"hello hello hello hello hello hello hello".repeat(20);
    let mut packet = pack(&block, &mut CompressState::default());
    assert!(PacketHeader::parse(&packet).unwrap().compressed);
    for b in &mut packet[HEADER_SIZE..] {
        *b = 0xFF;
    }
    assert!(matches!(
        unpack(&packet, &mut DecompressState::default()),
        Err(Error::CorruptPacket(_))
    ));
}

#[test]
fn truncated_packet_detected() {
    let packet = pack(&vec![3u8; 1000], &mut CompressState::default());
    let mut out = vec![0u8; 1000];
    assert!(matches!(
        decompress(&packet[..packet.len() - 1], &mut out, &mut DecompressState::default()),
        Err(Error::TruncatedStream { .. })
    ));
}
