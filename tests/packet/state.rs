// Integration tests for src/packet/state.rs: codec configuration and
// per-stream scratch state.
//
// Coverage:
//   - CodecConfig validation and derived values (class, window, suffix)
//   - packet counters and reset()
//   - states with differing configuration cannot decode each other

use qzip::packet::{compress, compress_bound, decompress, CodecConfig, CompressState, DecompressState};
use qzip::Error;

#[test]
fn config_validation() {
    assert!(CodecConfig::new(0, 1000).is_err());
    assert!(CodecConfig::new(4, 1000).is_err());
    assert!(CodecConfig::new(1, 0).is_err());
    assert!(CodecConfig::new(2, 1).is_ok());
}

#[test]
fn stream_class_boundaries() {
    let class = |sb| CodecConfig::new(3, sb).unwrap().stream_class();
    assert_eq!(class(1), 1);
    assert_eq!(class(100_000), 1);
    assert_eq!(class(100_001), 2);
    assert_eq!(class(1_000_000), 2);
    assert_eq!(class(1_000_001), 3);
}

#[test]
fn history_window_by_level_capped_by_buffer() {
    assert_eq!(CodecConfig::new(1, 1 << 20).unwrap().history_window(), 16 * 1024);
    assert_eq!(CodecConfig::new(2, 1 << 20).unwrap().history_window(), 32 * 1024);
    assert_eq!(CodecConfig::new(3, 1 << 20).unwrap().history_window(), 64 * 1024);
    assert_eq!(CodecConfig::new(3, 1000).unwrap().history_window(), 1000);
}

#[test]
fn suffix_carries_level() {
    assert_eq!(CodecConfig::new(1, 10).unwrap().suffix(), ".qz1");
    assert_eq!(CodecConfig::default().suffix(), format!(".qz{}", qzip::config::COMPRESSION_LEVEL));
}

#[test]
fn packet_counters_and_reset() {
    let mut c = CompressState::default();
    let mut d = DecompressState::default();
    let mut packet = vec![0u8; compress_bound(64)];
    let mut out = vec![0u8; 64];

    for _ in 0..3 {
        let n = compress(&[9u8; 64], &mut packet, &mut c).unwrap();
        decompress(&packet[..n], &mut out, &mut d).unwrap();
    }
    assert_eq!(c.packets(), 3);
    assert_eq!(d.packets(), 3);

    c.reset();
    d.reset();
    assert_eq!(c.packets(), 0);
    assert_eq!(d.packets(), 0);
}

#[test]
fn reset_state_decodes_a_new_stream() {
    let mut c = CompressState::default();
    let mut d = DecompressState::default();
    let mut packet = vec![0u8; compress_bound(4096)];
    let mut out = vec![0u8; 4096];
    let block = b"0123456789abcdef".repeat(256);

    let n = compress(&block, &mut packet, &mut c).unwrap();
    decompress(&packet[..n], &mut out, &mut d).unwrap();

    // Second stream: both sides start over.
    c.reset();
    d.reset();
    let n = compress(&block, &mut packet, &mut c).unwrap();
    let m = decompress(&packet[..n], &mut out, &mut d).unwrap();
    assert_eq!(&out[..m], &block[..]);
}

#[test]
fn mismatched_level_reported() {
    let producer = CodecConfig::new(1, 50_000).unwrap();
    let consumer = CodecConfig::new(3, 50_000).unwrap();
    let mut packet = vec![0u8; compress_bound(100)];
    let n = compress(&[1u8; 100], &mut packet, &mut CompressState::new(producer)).unwrap();
    let mut out = vec![0u8; 100];
    let err = decompress(&packet[..n], &mut out, &mut DecompressState::new(consumer)).unwrap_err();
    assert!(matches!(
        err,
        Error::ConfigMismatch { expected_level: 3, found_level: 1, .. }
    ));
    assert_eq!(err.exit_code(), 1);
}
