//! Packet-stream decoder.
//!
//! [`decode_stream`] reads one 9-byte header at a time.  A read that yields
//! nothing at a packet boundary is the clean end of the stream; anything
//! between one and eight bytes is a truncated packet.  The header gives the
//! packet's total size and its decompressed size.  The payload is read into
//! the packet buffer as it arrives; only once it is complete is the block
//! buffer grown to the declared size and the packet decoded.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::io::buffer::StreamBuffers;
use crate::io::file_io::read_fully;
use crate::io::stream_compress::StreamStats;
use crate::packet::{decompress, DecompressState, PacketHeader, HEADER_SIZE};

/// Decompresses the packet stream on `src` into `dst`.
///
/// `state` must be fresh (or reset) and configured like the producer.
/// `buffers` may be reused across streams; it only ever grows.
pub fn decode_stream<R: Read + ?Sized, W: Write + ?Sized>(
    src: &mut R,
    dst: &mut W,
    state: &mut DecompressState,
    buffers: &mut StreamBuffers,
) -> Result<StreamStats> {
    let mut stats = StreamStats::default();
    let mut header_bytes = [0u8; HEADER_SIZE];

    loop {
        let got = read_fully(src, &mut header_bytes)?;
        if got == 0 {
            break;
        }
        if got < HEADER_SIZE {
            return Err(Error::TruncatedStream {
                expected: HEADER_SIZE,
                actual: got,
            });
        }

        let header = PacketHeader::parse(&header_bytes)?;
        let total = header.total_size as usize;
        let size = header.decompressed_size as usize;

        buffers.packet.ensure_capacity(HEADER_SIZE);
        buffers.packet.as_mut_slice()[..HEADER_SIZE].copy_from_slice(&header_bytes);
        let payload_got = buffers.packet.fill_from(src, HEADER_SIZE, total)?;
        if payload_got < total - HEADER_SIZE {
            return Err(Error::TruncatedStream {
                expected: total,
                actual: HEADER_SIZE + payload_got,
            });
        }

        if buffers.block.ensure_capacity(size) {
            crate::displaylevel!(4, "block buffer grown to {} bytes\n", size);
        }

        let d = decompress(
            &buffers.packet.as_slice()[..total],
            buffers.block.as_mut_slice(),
            state,
        )?;
        dst.write_all(&buffers.block.as_slice()[..d])?;

        stats.bytes_in += total as u64;
        stats.bytes_out += d as u64;
        stats.packets += 1;

        crate::displaylevel!(4, "{} bytes decompressed into {}\n", total, d);
    }

    dst.flush()?;
    Ok(stats)
}
