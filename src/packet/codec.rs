//! Packet compression and decompression.
//!
//! [`compress`] turns one block into one self-describing packet;
//! [`decompress`] turns one packet back into its block.  Both thread the
//! stream's scratch state through every call, so each packet may reference
//! data from earlier packets of the same stream.
//!
//! The payload is an LZ4 block encoded against the stream history.  When
//! that does not make the block smaller, the block is stored verbatim and
//! the header's compressed flag is cleared, which bounds every packet at
//! `block_len + HEADER_SIZE` bytes on disk.

use crate::error::{Error, Result};
use crate::packet::header::{PacketHeader, HEADER_SIZE};
use crate::packet::state::{CompressState, DecompressState};

/// Largest block a single packet can carry.
pub const MAX_PACKET_BLOCK: usize = u32::MAX as usize - HEADER_SIZE - 1024;

/// Output buffer size [`compress`] needs for a block of `block_len` bytes.
#[inline]
pub fn compress_bound(block_len: usize) -> usize {
    HEADER_SIZE + lz4_flex::block::get_maximum_output_size(block_len).max(block_len)
}

/// Compresses `block` into `dst` as one packet and returns the packet length.
///
/// `dst` must hold at least [`compress_bound`]`(block.len())` bytes.  The
/// block is appended to `state`'s history afterwards.
pub fn compress(block: &[u8], dst: &mut [u8], state: &mut CompressState) -> Result<usize> {
    if block.len() > MAX_PACKET_BLOCK {
        return Err(Error::BlockTooLarge(block.len()));
    }
    let bound = compress_bound(block.len());
    if dst.len() < bound {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("output buffer of {} bytes is below the {} byte bound", dst.len(), bound),
        )));
    }

    let encoded = lz4_flex::block::compress_into_with_dict(
        block,
        &mut dst[HEADER_SIZE..bound],
        state.dictionary(),
    )
    .map_err(|e| Error::CorruptPacket(format!("block encoder failed: {e}")))?;

    // Fall back to a stored payload when encoding does not pay off.
    let (compressed, payload_len) = if encoded < block.len() {
        (true, encoded)
    } else {
        dst[HEADER_SIZE..HEADER_SIZE + block.len()].copy_from_slice(block);
        (false, block.len())
    };

    let config = state.config();
    let header = PacketHeader {
        compressed,
        level: config.level(),
        stream_class: config.stream_class(),
        total_size: (HEADER_SIZE + payload_len) as u32,
        decompressed_size: block.len() as u32,
    };
    dst[..HEADER_SIZE].copy_from_slice(&header.encode());

    state.absorb(block);
    Ok(HEADER_SIZE + payload_len)
}

/// Decompresses one complete packet into `dst` and returns the block length.
///
/// `packet` must contain at least the number of bytes its header declares;
/// `dst` must hold at least the declared decompressed size.  The packet's
/// level and streaming class must match `state`'s configuration.
pub fn decompress(packet: &[u8], dst: &mut [u8], state: &mut DecompressState) -> Result<usize> {
    let header = PacketHeader::parse(packet)?;

    let config = state.config();
    if header.level != config.level() || header.stream_class != config.stream_class() {
        return Err(Error::ConfigMismatch {
            expected_level: config.level(),
            expected_stream: config.stream_class(),
            found_level: header.level,
            found_stream: header.stream_class,
        });
    }

    let total = header.total_size as usize;
    if packet.len() < total {
        return Err(Error::TruncatedStream {
            expected: total,
            actual: packet.len(),
        });
    }
    let size = header.decompressed_size as usize;
    if dst.len() < size {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("output buffer of {} bytes cannot hold {} decompressed bytes", dst.len(), size),
        )));
    }
    if size == 0 {
        state.absorb(&[]);
        return Ok(0);
    }

    let payload = &packet[HEADER_SIZE..total];
    let out = &mut dst[..size];
    if header.compressed {
        let n = lz4_flex::block::decompress_into_with_dict(payload, out, state.dictionary())
            .map_err(|e| Error::CorruptPacket(format!("block decoder failed: {e}")))?;
        if n != size {
            return Err(Error::CorruptPacket(format!(
                "packet declared {size} bytes but decoded to {n}"
            )));
        }
    } else {
        out.copy_from_slice(payload);
    }

    state.absorb(out);
    Ok(size)
}
