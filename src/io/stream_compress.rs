//! Packet-stream encoder.
//!
//! A stream is nothing but packets back to back: no magic number, no
//! trailer, no index.  [`encode_stream`] fills blocks of up to
//! `block_size` bytes from the source, compresses each with the same
//! [`CompressState`] (so later packets can reference earlier data), and
//! writes every packet verbatim.  An empty source produces an empty stream.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::io::buffer::GrowableBuffer;
use crate::io::file_io::read_fully;
use crate::packet::{compress, compress_bound, CompressState, MAX_PACKET_BLOCK};

/// Byte and packet counts of one encode or decode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Bytes consumed from the source.
    pub bytes_in: u64,
    /// Bytes written to the sink.
    pub bytes_out: u64,
    /// Packets written (encode) or read (decode).
    pub packets: u64,
}

impl StreamStats {
    /// Output size as a percentage of input size; 100 for empty input.
    pub fn ratio_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            100.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64 * 100.0
        }
    }
}

/// Compresses everything `src` yields into a packet stream on `dst`.
///
/// Reads up to `block_size` bytes per packet; short reads are retried until
/// the block is full or the source reports end-of-input.  `state` must be
/// fresh (or reset) for a new stream and is left holding the stream's
/// trailing history.
pub fn encode_stream<R: Read + ?Sized, W: Write + ?Sized>(
    src: &mut R,
    dst: &mut W,
    state: &mut CompressState,
    block_size: usize,
) -> Result<StreamStats> {
    if block_size == 0 || block_size > MAX_PACKET_BLOCK {
        return Err(Error::BlockTooLarge(block_size));
    }

    let mut block = GrowableBuffer::with_capacity(block_size);
    let mut packet = GrowableBuffer::with_capacity(compress_bound(block_size));
    let mut stats = StreamStats::default();

    loop {
        let n = read_fully(src, &mut block.as_mut_slice()[..block_size])?;
        if n == 0 {
            break;
        }
        stats.bytes_in += n as u64;

        let c = compress(&block.as_slice()[..n], packet.as_mut_slice(), state)?;
        dst.write_all(&packet.as_slice()[..c])?;
        stats.bytes_out += c as u64;
        stats.packets += 1;

        crate::displaylevel!(4, "{} bytes compressed into {}\n", n, c);
    }

    dst.flush()?;
    Ok(stats)
}
