//! Error type shared by the codec adapter, the packet framer, and the file
//! transaction layer.
//!
//! Every variant is fatal to the stream or file it was raised for.  The CLI
//! maps each one to a process exit code through [`Error::exit_code`]:
//!
//! | Code | Meaning                                                        |
//! |------|----------------------------------------------------------------|
//! | 1    | validation: bad suffix, collision, malformed/mismatched stream |
//! | 2    | I/O: open, read, write, or rename failure                      |
//! | 3    | the source could not be removed after a successful publish     |

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit code for usage and validation failures.
pub const EXIT_VALIDATION: i32 = 1;
/// Exit code for I/O failures (open, read, write, rename).
pub const EXIT_IO: i32 = 2;
/// Exit code when the original could not be removed after publishing.
pub const EXIT_UNLINK: i32 = 3;

#[derive(Error, Debug)]
pub enum Error {
    /// Read or write failure on an already-open stream.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A header or payload read returned fewer bytes than the packet declares.
    #[error("truncated stream: expected {expected} bytes, got {actual}")]
    TruncatedStream { expected: usize, actual: usize },

    /// The packet bytes are not something the codec produced.
    #[error("corrupted packet: {0}")]
    CorruptPacket(String),

    /// The packet was produced with a different level or streaming buffer.
    #[error(
        "packet was produced with level {found_level} (streaming class {found_stream}), \
         this build expects level {expected_level} (streaming class {expected_stream})"
    )]
    ConfigMismatch {
        expected_level: u8,
        expected_stream: u8,
        found_level: u8,
        found_stream: u8,
    },

    /// A runtime codec configuration outside the supported range.
    #[error("invalid codec configuration: {0}")]
    InvalidConfig(String),

    /// A block larger than the packet format can describe.
    #[error("block of {0} bytes exceeds the packet size limit")]
    BlockTooLarge(usize),

    /// The final destination already exists.
    #[error("File already exists. Will not overwrite '{}'", .0.display())]
    DestinationExists(PathBuf),

    /// The temporary sibling of the destination already exists.
    #[error("Temporary file already exists. Will not overwrite '{}'", .0.display())]
    TempExists(PathBuf),

    /// A decompression source does not carry the expected suffix.
    #[error("File does not end in '{suffix}': '{}'", .path.display())]
    SuffixMismatch { path: PathBuf, suffix: String },

    /// Open, create, sync, or rename failure on a named path.
    #[error("{op} '{}': {source}", .path.display())]
    FileIo {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output was published but the original could not be removed;
    /// both files are now present.
    #[error("Unable to unlink original file '{}': {source}", .path.display())]
    PublishFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Wraps an I/O error with the operation and path it happened on.
    pub fn file_io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::FileIo {
            op,
            path: path.into(),
            source,
        }
    }

    /// True for the two name-collision variants.
    pub fn is_name_collision(&self) -> bool {
        matches!(self, Error::DestinationExists(_) | Error::TempExists(_))
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) | Error::FileIo { .. } => EXIT_IO,
            Error::PublishFailure { .. } => EXIT_UNLINK,
            Error::TruncatedStream { .. }
            | Error::CorruptPacket(_)
            | Error::ConfigMismatch { .. }
            | Error::InvalidConfig(_)
            | Error::BlockTooLarge(_)
            | Error::DestinationExists(_)
            | Error::TempExists(_)
            | Error::SuffixMismatch { .. } => EXIT_VALIDATION,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
