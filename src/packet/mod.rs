//! Codec adapter: self-describing packets over a stateful block codec.
//!
//! | Submodule  | Responsibility |
//! |------------|----------------|
//! | [`header`] | 9-byte packet header: layout, parsing, size probes. |
//! | [`state`]  | `CodecConfig` and the per-stream scratch states. |
//! | [`codec`]  | `compress` / `decompress` of a single packet. |
//!
//! The framing loops that drive these primitives over whole streams live in
//! [`crate::io`].

pub mod codec;
pub mod header;
pub mod state;

pub use codec::{compress, compress_bound, decompress, MAX_PACKET_BLOCK};
pub use header::{compressed_size, decompressed_size, PacketHeader, HEADER_SIZE, MAX_EXPANSION};
pub use state::{CodecConfig, CompressState, DecompressState, MAX_HISTORY};
