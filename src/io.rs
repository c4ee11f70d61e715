//! Stream and file I/O for the packet format.
//!
//! Layers, bottom-up:
//! - [`buffer`]: growable packet/block buffers
//! - [`stream_compress`] / [`stream_decompress`]: the packet framer
//! - [`file_io`]: source opening and short-read handling
//! - [`transaction`]: temp-file-then-rename replacement of one file
//! - [`dispatch`]: per-mode entry points and the multi-file runner
//! - [`prefs`]: runtime preferences

pub mod buffer;
pub mod dispatch;
pub mod file_io;
pub mod prefs;
pub mod stream_compress;
pub mod stream_decompress;
pub mod transaction;

pub use buffer::{GrowableBuffer, StreamBuffers};
pub use prefs::{ErrorPolicy, Prefs};
pub use stream_compress::{encode_stream, StreamStats};
pub use stream_decompress::decode_stream;
pub use transaction::{temp_path_for, FileTransaction, TxState};

pub use dispatch::{
    compress_filename, compress_stream, compressed_name, decompress_filename,
    decompress_filename_to, decompress_stream, decompressed_name, process_files, process_stream,
    BatchResult, Mode,
};
