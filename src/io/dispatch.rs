//! Operation dispatch: one entry point per mode, plus the multi-file runner.
//!
//! Naming rules:
//! - compression writes `<src><suffix>` where the suffix is `.qz<level>`;
//! - decompression requires `<stem><suffix>` and writes `<stem>`;
//! - decompress-to-stdout requires the suffix too but leaves the source alone.
//!
//! File-to-file operations go through a [`FileTransaction`]; stdin/stdout
//! and decompress-to-stdout do not touch the filesystem beyond reading.
//! Every file gets a fresh codec state.

use std::ffi::{OsStr, OsString};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::io::buffer::StreamBuffers;
use crate::io::file_io::open_src_file;
use crate::io::prefs::{ErrorPolicy, Prefs};
use crate::io::stream_compress::{encode_stream, StreamStats};
use crate::io::stream_decompress::decode_stream;
use crate::io::transaction::FileTransaction;
use crate::packet::{CompressState, DecompressState};

/// What to do with each input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    DecompressToStdout,
}

impl Mode {
    /// Name used as the prefix of diagnostics.
    pub fn program_name(self) -> &'static str {
        use crate::cli::constants::{QCAT, QUNZIP, QZIP};
        match self {
            Mode::Compress => QZIP,
            Mode::Decompress => QUNZIP,
            Mode::DecompressToStdout => QCAT,
        }
    }

    /// Whether the payload of this mode goes to stdout even with file
    /// arguments.
    pub fn writes_stdout(self) -> bool {
        matches!(self, Mode::DecompressToStdout)
    }
}

// ── Destination names ────────────────────────────────────────────────────────

/// `<src><suffix>`.
pub fn compressed_name(src: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = src.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Strips `suffix` from `src`, or fails with [`Error::SuffixMismatch`].
///
/// Works on the raw name, so non-UTF-8 names are handled.  A name that is
/// nothing but the suffix is rejected too: there would be no output name
/// left.
pub fn decompressed_name(src: &Path, suffix: &str) -> Result<PathBuf> {
    let mismatch = || Error::SuffixMismatch {
        path: src.to_path_buf(),
        suffix: suffix.to_owned(),
    };
    let stem = strip_os_suffix(src.as_os_str(), suffix).ok_or_else(mismatch)?;
    match stem.as_encoded_bytes().last() {
        Some(&last) if !std::path::is_separator(last as char) => Ok(PathBuf::from(stem)),
        _ => Err(mismatch()),
    }
}

#[cfg(unix)]
fn strip_os_suffix<'a>(name: &'a OsStr, suffix: &str) -> Option<&'a OsStr> {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes()
        .strip_suffix(suffix.as_bytes())
        .map(OsStr::from_bytes)
}

#[cfg(not(unix))]
fn strip_os_suffix<'a>(name: &'a OsStr, suffix: &str) -> Option<&'a OsStr> {
    name.to_str()?.strip_suffix(suffix).map(OsStr::new)
}

// ── Stream operations ────────────────────────────────────────────────────────

/// Compresses `src` into `dst` with a fresh state.
pub fn compress_stream<R: Read + ?Sized, W: Write + ?Sized>(
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<StreamStats> {
    let mut state = CompressState::new(prefs.codec);
    encode_stream(src, dst, &mut state, prefs.block_size)
}

/// Decompresses `src` into `dst` with a fresh state and fresh buffers.
pub fn decompress_stream<R: Read + ?Sized, W: Write + ?Sized>(
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<StreamStats> {
    let mut state = DecompressState::new(prefs.codec);
    let mut buffers = StreamBuffers::new(prefs.block_size);
    decode_stream(src, dst, &mut state, &mut buffers)
}

// ── File operations ──────────────────────────────────────────────────────────

/// Replaces `src` with `src.qz<level>`.
pub fn compress_filename(src: &Path, prefs: &Prefs) -> Result<StreamStats> {
    let dst = compressed_name(src, &prefs.suffix());
    let stats = FileTransaction::new(src, &dst, prefs)
        .run(|input, output| compress_stream(input, output, prefs))?;
    crate::displaylevel!(
        2,
        "{}: Compressed {} bytes into {} bytes ==> {:.2}%\n",
        src.display(),
        stats.bytes_in,
        stats.bytes_out,
        stats.ratio_percent()
    );
    Ok(stats)
}

/// Replaces `<stem>.qz<level>` with `<stem>`.
pub fn decompress_filename(src: &Path, prefs: &Prefs) -> Result<StreamStats> {
    let dst = decompressed_name(src, &prefs.suffix())?;
    let stats = FileTransaction::new(src, &dst, prefs)
        .run(|input, output| decompress_stream(input, output, prefs))?;
    crate::displaylevel!(
        2,
        "{}: decoded {} bytes\n",
        src.display(),
        stats.bytes_out
    );
    Ok(stats)
}

/// Decompresses `<stem>.qz<level>` into `dst`, leaving the source in place.
pub fn decompress_filename_to<W: Write + ?Sized>(
    src: &Path,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<StreamStats> {
    decompressed_name(src, &prefs.suffix())?;
    let mut input = open_src_file(src)?;
    let stats = decompress_stream(&mut input, dst, prefs)?;
    crate::displaylevel!(3, "{}: decoded {} bytes\n", src.display(), stats.bytes_out);
    Ok(stats)
}

/// Runs `mode` over stdin → stdout-like `dst`.
pub fn process_stream<R: Read + ?Sized, W: Write + ?Sized>(
    mode: Mode,
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<StreamStats> {
    let stats = match mode {
        Mode::Compress => compress_stream(src, dst, prefs)?,
        Mode::Decompress | Mode::DecompressToStdout => decompress_stream(src, dst, prefs)?,
    };
    crate::displaylevel!(
        3,
        "stdin: {} bytes in, {} bytes out, {} packets\n",
        stats.bytes_in,
        stats.bytes_out,
        stats.packets
    );
    Ok(stats)
}

// ── Multi-file runner ────────────────────────────────────────────────────────

/// Outcome of [`process_files`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
    /// Files never attempted because [`ErrorPolicy::Abort`] stopped the batch.
    pub skipped: usize,
    /// Exit code of the first failure, 0 when everything succeeded.
    pub exit_code: i32,
}

/// Processes each path as an independent operation.
///
/// Failures are reported on stderr as they happen.  Under
/// [`ErrorPolicy::Continue`] the remaining files are still attempted; under
/// [`ErrorPolicy::Abort`] they are skipped.  `stdout` receives the payload
/// for [`Mode::DecompressToStdout`] and is unused otherwise.
pub fn process_files<P, W>(mode: Mode, files: &[P], prefs: &Prefs, stdout: &mut W) -> BatchResult
where
    P: AsRef<Path>,
    W: Write + ?Sized,
{
    let mut result = BatchResult::default();

    for (i, file) in files.iter().enumerate() {
        let src = file.as_ref();
        let outcome = match mode {
            Mode::Compress => compress_filename(src, prefs),
            Mode::Decompress => decompress_filename(src, prefs),
            Mode::DecompressToStdout => decompress_filename_to(src, &mut *stdout, prefs),
        };

        match outcome {
            Ok(_) => result.succeeded += 1,
            Err(e) => {
                crate::displaylevel!(1, "{}: {}\n", mode.program_name(), e);
                result.failed += 1;
                if result.exit_code == 0 {
                    result.exit_code = e.exit_code();
                }
                if prefs.error_policy == ErrorPolicy::Abort {
                    result.skipped = files.len() - i - 1;
                    break;
                }
            }
        }
    }

    if result.failed > 0 && files.len() > 1 {
        crate::displaylevel!(
            2,
            "{} of {} files failed\n",
            result.failed,
            files.len()
        );
    }
    result
}
