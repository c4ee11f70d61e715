//! Growable packet and block buffers.
//!
//! A stream is decoded with two buffers: one for the compressed packet being
//! assembled and one for the block it decompresses to.  Both start at the
//! size implied by the default block bound and are regrown independently
//! whenever a packet header declares something larger, since a producer may
//! have used a different block size than the consumer expects.
//!
//! Growth discards the old contents (free, then allocate).  Callers must
//! grow a buffer before writing into it for the current packet, never in the
//! middle of using it.  Buffers never shrink.  An allocation failure aborts
//! the process: there is no smaller buffer that could still hold the packet.
//!
//! A packet's payload is read with [`GrowableBuffer::fill_from`], which
//! grows in bounded steps as bytes actually arrive, so a header declaring a
//! huge packet on a short stream costs at most one step of memory.

use std::io::{self, Read};

use crate::io::file_io::read_fully;
use crate::packet::compress_bound;

/// Largest single growth made by [`GrowableBuffer::fill_from`].
pub const FILL_STEP: usize = 4 * 1024 * 1024;

/// An owned byte region whose capacity only grows.
#[derive(Debug, Clone, Default)]
pub struct GrowableBuffer {
    data: Vec<u8>,
}

impl GrowableBuffer {
    /// Allocates a zeroed buffer of `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        GrowableBuffer {
            data: vec![0u8; capacity],
        }
    }

    /// Usable size in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Guarantees `capacity() >= needed`.
    ///
    /// Reallocates only when the current capacity is insufficient; returns
    /// `true` when it did.  Contents are not preserved across a regrowth.
    pub fn ensure_capacity(&mut self, needed: usize) -> bool {
        if needed <= self.data.len() {
            return false;
        }
        // Release the old region first so peak usage stays at one buffer.
        self.data = Vec::new();
        self.data = vec![0u8; needed];
        true
    }

    /// Reads from `src` into `start..end`, growing as data arrives.
    ///
    /// Bytes before `start` are preserved.  Capacity grows at most
    /// [`FILL_STEP`] beyond what has been read so far.  Returns the number of
    /// bytes read; fewer than `end - start` means `src` hit end-of-input.
    pub fn fill_from<R: Read + ?Sized>(
        &mut self,
        src: &mut R,
        start: usize,
        end: usize,
    ) -> io::Result<usize> {
        let mut pos = start;
        while pos < end {
            let chunk_end = end.min(pos.saturating_add(FILL_STEP));
            if self.data.len() < chunk_end {
                self.data.resize(chunk_end, 0);
            }
            let n = read_fully(src, &mut self.data[pos..chunk_end])?;
            pos += n;
            if pos < chunk_end {
                break;
            }
        }
        Ok(pos - start)
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// The buffer pair owned by one stream.
#[derive(Debug, Clone)]
pub struct StreamBuffers {
    /// Holds one whole packet (header + payload).
    pub packet: GrowableBuffer,
    /// Holds one whole uncompressed block.
    pub block: GrowableBuffer,
}

impl StreamBuffers {
    /// Buffers sized for blocks of up to `block_size` bytes.
    pub fn new(block_size: usize) -> Self {
        StreamBuffers {
            packet: GrowableBuffer::with_capacity(compress_bound(block_size)),
            block: GrowableBuffer::with_capacity(block_size),
        }
    }
}
