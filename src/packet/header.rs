//! Packet header encoding and validation.
//!
//! Every packet starts with a fixed 9-byte header:
//!
//! | Offset | Size | Field                                            |
//! |--------|------|--------------------------------------------------|
//! | 0      | 1    | flags                                            |
//! | 1      | 4    | total packet size, header included (u32 LE)     |
//! | 5      | 4    | decompressed size (u32 LE)                       |
//!
//! Flag bits: bit 0 = payload compressed (clear: stored verbatim),
//! bit 1 = long header (always set), bits 2–3 = compression level,
//! bits 4–5 = streaming-buffer class, bit 6 = marker (always set),
//! bit 7 = reserved (zero).
//!
//! The header alone is enough to locate the next packet and to size the
//! buffer that will receive this packet's decompressed output.

use crate::error::{Error, Result};

/// Size in bytes of every packet header.
pub const HEADER_SIZE: usize = 9;

const FLAG_COMPRESSED: u8 = 0x01;
const FLAG_LONG_HEADER: u8 = 0x02;
const FLAG_LEVEL_SHIFT: u8 = 2;
const FLAG_LEVEL_MASK: u8 = 0x03 << FLAG_LEVEL_SHIFT;
const FLAG_STREAM_SHIFT: u8 = 4;
const FLAG_STREAM_MASK: u8 = 0x03 << FLAG_STREAM_SHIFT;
const FLAG_MARKER: u8 = 0x40;
const FLAG_RESERVED: u8 = 0x80;

/// Most output bytes one LZ4 payload byte can stand for: a match length is
/// extended 255 at a time, one byte per step.
pub const MAX_EXPANSION: usize = 255;

/// Decoded form of a packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// `false` when the payload is the block stored verbatim.
    pub compressed: bool,
    /// Compression level the producer was configured with (1..=3).
    pub level: u8,
    /// Streaming-buffer class the producer was configured with (0..=3).
    pub stream_class: u8,
    /// Total on-disk packet size, header included.
    pub total_size: u32,
    /// Number of bytes the packet decompresses to.
    pub decompressed_size: u32,
}

impl PacketHeader {
    /// Payload length (`total_size - HEADER_SIZE`).
    #[inline]
    pub fn payload_len(&self) -> usize {
        (self.total_size as usize).saturating_sub(HEADER_SIZE)
    }

    /// Serialises the header into its 9-byte wire form.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut flags = FLAG_LONG_HEADER | FLAG_MARKER;
        if self.compressed {
            flags |= FLAG_COMPRESSED;
        }
        flags |= (self.level << FLAG_LEVEL_SHIFT) & FLAG_LEVEL_MASK;
        flags |= (self.stream_class << FLAG_STREAM_SHIFT) & FLAG_STREAM_MASK;

        let mut out = [0u8; HEADER_SIZE];
        out[0] = flags;
        out[1..5].copy_from_slice(&self.total_size.to_le_bytes());
        out[5..9].copy_from_slice(&self.decompressed_size.to_le_bytes());
        out
    }

    /// Parses and structurally validates a header.
    ///
    /// Only the first [`HEADER_SIZE`] bytes of `bytes` are read.  The checks
    /// cover the fixed flag bits, a total size that at least covers the
    /// header, and payload/decompressed-size consistency:
    ///
    /// - a stored payload must be exactly as long as the decompressed size;
    /// - a compressed payload must not exceed the codec's worst case for the
    ///   declared decompressed size, and must be long enough to expand to it
    ///   (at most [`MAX_EXPANSION`] output bytes per payload byte).
    ///
    /// The second bound keeps a tiny packet from claiming gigabytes of output
    /// before any payload has been read.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::TruncatedStream {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }
        let flags = bytes[0];
        if flags & FLAG_MARKER == 0 || flags & FLAG_RESERVED != 0 {
            return Err(Error::CorruptPacket(format!(
                "bad header flags {flags:#04x}"
            )));
        }
        if flags & FLAG_LONG_HEADER == 0 {
            return Err(Error::CorruptPacket(
                "short packet headers are not produced by this format".to_owned(),
            ));
        }

        let header = PacketHeader {
            compressed: flags & FLAG_COMPRESSED != 0,
            level: (flags & FLAG_LEVEL_MASK) >> FLAG_LEVEL_SHIFT,
            stream_class: (flags & FLAG_STREAM_MASK) >> FLAG_STREAM_SHIFT,
            total_size: read_le32(bytes, 1),
            decompressed_size: read_le32(bytes, 5),
        };

        if (header.total_size as usize) < HEADER_SIZE {
            return Err(Error::CorruptPacket(format!(
                "declared packet size {} is smaller than its header",
                header.total_size
            )));
        }
        let payload = header.payload_len();
        let decompressed = header.decompressed_size as usize;
        if header.compressed {
            if payload > lz4_flex::block::get_maximum_output_size(decompressed) {
                return Err(Error::CorruptPacket(format!(
                    "compressed payload of {payload} bytes cannot expand to {decompressed} bytes"
                )));
            }
            if decompressed > payload.saturating_mul(MAX_EXPANSION) {
                return Err(Error::CorruptPacket(format!(
                    "compressed payload of {payload} bytes cannot produce {decompressed} bytes"
                )));
            }
        } else if payload != decompressed {
            return Err(Error::CorruptPacket(format!(
                "stored payload of {payload} bytes declares {decompressed} decompressed bytes"
            )));
        }
        Ok(header)
    }
}

#[inline]
fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([src[offset], src[offset + 1], src[offset + 2], src[offset + 3]])
}

/// Total packet size declared by `header`, header included.
///
/// Reads the size field only; no validation.  `header` must hold at least
/// [`HEADER_SIZE`] bytes.
#[inline]
pub fn compressed_size(header: &[u8]) -> usize {
    read_le32(header, 1) as usize
}

/// Decompressed size declared by `header`.
///
/// Reads the size field only; no validation.  `header` must hold at least
/// [`HEADER_SIZE`] bytes.
#[inline]
pub fn decompressed_size(header: &[u8]) -> usize {
    read_le32(header, 5) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
