// Integration tests for src/packet/header.rs: the 9-byte packet header.
//
// Coverage:
//   - size probes read the two little-endian fields of real packets
//   - flag bits: marker, long header, level, streaming class
//   - parse rejects reserved bits, short headers, undersized totals,
//     stored payloads whose length disagrees with the decompressed size

use qzip::packet::{
    compress, compress_bound, compressed_size, decompressed_size, CompressState, PacketHeader,
    HEADER_SIZE,
};
use qzip::Error;

fn packet_for(block: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(block.len())];
    let n = compress(block, &mut dst, &mut CompressState::default()).unwrap();
    dst.truncate(n);
    dst
}

#[test]
fn size_probes_match_real_packet() {
    let block = b"abcabcabcabcabcabcabcabcabcabcabcabc".repeat(30);
    let packet = packet_for(&block);
    assert_eq!(compressed_size(&packet), packet.len());
    assert_eq!(decompressed_size(&packet), block.len());
}

#[test]
fn fixed_flag_bits_are_set() {
    let packet = packet_for(b"some bytes");
    let flags = packet[0];
    assert_eq!(flags & 0x02, 0x02, "long header bit");
    assert_eq!(flags & 0x40, 0x40, "marker bit");
    assert_eq!(flags & 0x80, 0, "reserved bit");
}

#[test]
fn level_and_class_recorded() {
    let packet = packet_for(b"x");
    let header = PacketHeader::parse(&packet).unwrap();
    let config = qzip::CodecConfig::default();
    assert_eq!(header.level, config.level());
    assert_eq!(header.stream_class, config.stream_class());
}

#[test]
fn encode_parse_agree_on_every_field() {
    let header = PacketHeader {
        compressed: false,
        level: 2,
        stream_class: 1,
        total_size: (HEADER_SIZE + 5) as u32,
        decompressed_size: 5,
    };
    let bytes = header.encode();
    assert_eq!(&bytes[1..5], &14u32.to_le_bytes());
    assert_eq!(&bytes[5..9], &5u32.to_le_bytes());
    assert_eq!(PacketHeader::parse(&bytes).unwrap(), header);
    assert_eq!(header.payload_len(), 5);
}

#[test]
fn reserved_bit_rejected() {
    let mut packet = packet_for(b"hello");
    packet[0] |= 0x80;
    assert!(matches!(PacketHeader::parse(&packet), Err(Error::CorruptPacket(_))));
}

#[test]
fn missing_marker_rejected() {
    let mut packet = packet_for(b"hello");
    packet[0] &= !0x40;
    assert!(matches!(PacketHeader::parse(&packet), Err(Error::CorruptPacket(_))));
}

#[test]
fn short_header_is_truncation() {
    let packet = packet_for(b"hello");
    assert!(matches!(
        PacketHeader::parse(&packet[..5]),
        Err(Error::TruncatedStream { expected: 9, actual: 5 })
    ));
}

#[test]
fn total_below_header_rejected() {
    let mut packet = packet_for(b"hello");
    packet[1..5].copy_from_slice(&3u32.to_le_bytes());
    assert!(matches!(PacketHeader::parse(&packet), Err(Error::CorruptPacket(_))));
}

#[test]
fn stored_length_mismatch_rejected() {
    let header = PacketHeader {
        compressed: false,
        level: 3,
        stream_class: 2,
        total_size: (HEADER_SIZE + 10) as u32,
        decompressed_size: 11,
    };
    assert!(matches!(
        PacketHeader::parse(&header.encode()),
        Err(Error::CorruptPacket(_))
    ));
}
