// config.rs: Compile-time codec configuration.
//
// A stream is only decodable by a consumer built with the same
// COMPRESSION_LEVEL and STREAMING_BUFFER as its producer.  Both values are
// recorded in every packet header and checked on decode, so a mismatch is
// reported as `Error::ConfigMismatch` instead of producing corrupt output.

// Compression level, one of 1, 2 or 3.
// Selects the length of the match history carried between packets and is
// embedded in the file suffix (`.qz3`).
pub const COMPRESSION_LEVEL: u8 = 3;

// Streaming buffer size in bytes.  Must be non-zero: this tool always runs the
// codec in streaming mode so that packets share match history.
pub const STREAMING_BUFFER: usize = 1_000_000;

// Default block bound: the largest chunk of input turned into one packet.
pub const MAX_BUF_SIZE: usize = 1024 * 1024;

// Largest block size accepted from `-B#`.  Packet sizes are stored as u32.
pub const MAX_BLOCK_SIZE_LIMIT: usize = 256 * 1024 * 1024;

const _: () = assert!(COMPRESSION_LEVEL >= 1 && COMPRESSION_LEVEL <= 3);
const _: () = assert!(STREAMING_BUFFER > 0);
const _: () = assert!(MAX_BUF_SIZE <= MAX_BLOCK_SIZE_LIMIT);
