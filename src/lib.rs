// qzip: packet-stream compressor with transactional in-place file replacement

pub mod config;
pub mod error;
pub mod packet;
pub mod util;
pub mod io;
pub mod cli;

/// Crate version, shown in the usage banner.
pub const QZIP_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use error::{Error, Result};
pub use packet::{compress, decompress, CodecConfig, CompressState, DecompressState};
pub use io::{decode_stream, encode_stream, Mode, Prefs, StreamStats};
