//! File I/O primitives for the packet-stream pipeline.
//!
//! - [`read_fully`]: fill a buffer across short reads, stopping only at EOF.
//! - [`open_src_file`]: open a regular file for reading, rejecting
//!   directories and special files with a path-tagged error.
//! - [`stdin_reader`] / [`stdout_writer`]: the unnamed-stream endpoints
//!   used when no file arguments are given.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Reads until `buf` is full or the source reports end-of-input.
///
/// Returns the number of bytes placed in `buf`; anything short of
/// `buf.len()` means EOF was reached.  `Interrupted` is retried.
pub fn read_fully<R: Read + ?Sized>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens `path` for reading.
///
/// The path must name a regular file once symlinks are followed;
/// directories, devices, and missing paths fail with [`Error::FileIo`].
pub fn open_src_file(path: &Path) -> Result<File> {
    let file = File::open(path).map_err(|e| Error::file_io("open", path, e))?;
    let meta = file.metadata().map_err(|e| Error::file_io("stat", path, e))?;
    if meta.is_dir() {
        return Err(Error::file_io(
            "open",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "is a directory"),
        ));
    }
    if !meta.is_file() {
        return Err(Error::file_io(
            "open",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    crate::displaylevel!(4, "Opened source {}\n", path.display());
    Ok(file)
}

// ---------------------------------------------------------------------------
// Unnamed streams
// ---------------------------------------------------------------------------

/// Locked standard input.
pub fn stdin_reader() -> io::StdinLock<'static> {
    crate::displaylevel!(4, "Using stdin for input\n");
    io::stdin().lock()
}

/// Buffered, locked standard output.
pub fn stdout_writer() -> BufWriter<io::StdoutLock<'static>> {
    crate::displaylevel!(4, "Using stdout for output\n");
    BufWriter::new(io::stdout().lock())
}

/// Flushes `w`, mapping the failure to a stdout write error.
pub fn finish_stdout<W: Write>(w: &mut W) -> Result<()> {
    w.flush().map_err(Error::Io)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
