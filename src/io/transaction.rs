//! Transactional file replacement.
//!
//! A [`FileTransaction`] turns one source file into one destination file
//! without ever exposing a partial destination and without clobbering
//! anything already on disk:
//!
//! 1. Refuse up front if the destination or the temporary sibling
//!    `<destination>.<pid>` is occupied.
//! 2. Open the source, then create the temporary file exclusively.
//! 3. Stream all output into the temporary file.
//! 4. Flush, `fsync`, copy the source's metadata, and move the temporary
//!    file onto the destination with a no-clobber rename.
//! 5. Remove the source.
//!
//! The temporary file is owned by a [`tempfile::TempPath`], so any exit
//! before step 4 (an error, an early return, a panic) deletes it unless
//! `keep_failed_temp` asks for it to be left behind for inspection.
//!
//! ```text
//! Idle -> SourceOpened -> DestTempOpened -> Streaming -> Renamed -> Published
//!    \__________\_______________\_______________\___________\_____-> Failed
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::error::{Error, Result};
use crate::io::file_io::open_src_file;
use crate::io::prefs::Prefs;
use crate::util::{path_occupied, set_file_stat, FileStat};

/// Output buffer between the framer and the temporary file.
const TEMP_WRITE_BUFFER: usize = 64 * 1024;

/// Lifecycle of one [`FileTransaction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxState {
    Idle,
    SourceOpened,
    DestTempOpened,
    Streaming,
    /// Destination in place; the source has not been removed yet.
    Renamed,
    /// Terminal: destination published and source removed.
    Published,
    /// Terminal: something failed; see the returned error for which step.
    Failed,
}

/// `<dst>.<token>`: the sibling the output is written to before publishing.
pub fn temp_path_for(dst: &Path, token: u32) -> PathBuf {
    let mut name = dst.as_os_str().to_owned();
    name.push(format!(".{token}"));
    PathBuf::from(name)
}

struct TempOutput {
    writer: BufWriter<File>,
    path: TempPath,
}

/// One source-to-destination replacement with all-or-nothing publish.
pub struct FileTransaction {
    source_path: PathBuf,
    dest_path: PathBuf,
    temp_path: PathBuf,
    keep_failed_temp: bool,
    preserve_file_stat: bool,
    state: TxState,
    source: Option<File>,
    source_stat: Option<FileStat>,
    temp: Option<TempOutput>,
}

impl FileTransaction {
    /// Prepares a transaction using this process's id as the temp token.
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>, prefs: &Prefs) -> Self {
        Self::with_token(source, dest, prefs, std::process::id())
    }

    /// Prepares a transaction with an explicit temp-name token.
    pub fn with_token(
        source: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        prefs: &Prefs,
        token: u32,
    ) -> Self {
        let dest_path = dest.into();
        let temp_path = temp_path_for(&dest_path, token);
        FileTransaction {
            source_path: source.into(),
            dest_path,
            temp_path,
            keep_failed_temp: prefs.keep_failed_temp,
            preserve_file_stat: prefs.preserve_file_stat,
            state: TxState::Idle,
            source: None,
            source_stat: None,
            temp: None,
        }
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn dest_path(&self) -> &Path {
        &self.dest_path
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    fn fail<T>(&mut self, err: Error) -> Result<T> {
        self.state = TxState::Failed;
        Err(err)
    }

    fn expect_state(&mut self, expected: TxState, step: &str) -> Result<()> {
        if self.state == expected {
            return Ok(());
        }
        let msg = format!("{step} called in state {:?}", self.state);
        self.fail(Error::Io(io::Error::other(msg)))
    }

    // ── Steps ────────────────────────────────────────────────────────────────

    /// Checks both output names, then opens the source.
    ///
    /// A collision fails before anything is created or opened.
    pub fn open_source(&mut self) -> Result<()> {
        self.expect_state(TxState::Idle, "open_source")?;

        if path_occupied(&self.dest_path) {
            let e = Error::DestinationExists(self.dest_path.clone());
            return self.fail(e);
        }
        if path_occupied(&self.temp_path) {
            let e = Error::TempExists(self.temp_path.clone());
            return self.fail(e);
        }

        let file = match open_src_file(&self.source_path) {
            Ok(f) => f,
            Err(e) => return self.fail(e),
        };
        if self.preserve_file_stat {
            match file.metadata() {
                Ok(m) => self.source_stat = Some(FileStat::from_metadata(&m)),
                Err(e) => {
                    let e = Error::file_io("stat", &self.source_path, e);
                    return self.fail(e);
                }
            }
        }
        self.source = Some(file);
        self.state = TxState::SourceOpened;
        Ok(())
    }

    /// Creates the temporary output exclusively.
    pub fn open_temp(&mut self) -> Result<()> {
        self.expect_state(TxState::SourceOpened, "open_temp")?;

        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.temp_path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                let e = Error::TempExists(self.temp_path.clone());
                return self.fail(e);
            }
            Err(e) => {
                let e = Error::file_io("create", &self.temp_path, e);
                return self.fail(e);
            }
        };
        crate::displaylevel!(4, "Writing to {}\n", self.temp_path.display());

        self.temp = Some(TempOutput {
            writer: BufWriter::with_capacity(TEMP_WRITE_BUFFER, file),
            path: TempPath::from_path(&self.temp_path),
        });
        self.state = TxState::DestTempOpened;
        Ok(())
    }

    /// Runs `body` with the source reader and the temporary writer.
    ///
    /// Any error from `body` fails the transaction.
    pub fn stream<T, F>(&mut self, body: F) -> Result<T>
    where
        F: FnOnce(&mut File, &mut BufWriter<File>) -> Result<T>,
    {
        self.expect_state(TxState::DestTempOpened, "stream")?;
        self.state = TxState::Streaming;

        let result = match (self.source.as_mut(), self.temp.as_mut()) {
            (Some(src), Some(temp)) => body(src, &mut temp.writer),
            _ => Err(Error::Io(io::Error::other("stream: files not open"))),
        };
        result.or_else(|e| self.fail(e))
    }

    /// Syncs the temporary file and renames it onto the destination.
    ///
    /// The rename refuses to replace an existing destination, so a file
    /// that appeared since [`open_source`](Self::open_source) is reported
    /// as [`Error::DestinationExists`] and left alone.
    pub fn publish(&mut self) -> Result<()> {
        self.expect_state(TxState::Streaming, "publish")?;
        let Some(TempOutput { writer, path }) = self.temp.take() else {
            return self.fail(Error::Io(io::Error::other("publish: no temporary output")));
        };
        self.source = None;

        let file = match writer.into_inner() {
            Ok(f) => f,
            Err(e) => {
                let e = Error::file_io("write", &self.temp_path, e.into_error());
                return self.abandon(path, e);
            }
        };
        if let Err(e) = file.sync_all() {
            let e = Error::file_io("sync", &self.temp_path, e);
            return self.abandon(path, e);
        }
        drop(file);

        if let Some(stat) = self.source_stat {
            match set_file_stat(&self.temp_path, &stat) {
                Ok(applied) if !applied.ownership => crate::displaylevel!(
                    3,
                    "Warning: could not preserve ownership of '{}'\n",
                    self.dest_path.display()
                ),
                Ok(_) => {}
                Err(e) => crate::displaylevel!(
                    2,
                    "Warning: could not preserve file attributes of '{}': {}\n",
                    self.dest_path.display(),
                    e
                ),
            }
        }

        if path_occupied(&self.dest_path) {
            let e = Error::DestinationExists(self.dest_path.clone());
            return self.abandon(path, e);
        }
        if let Err(err) = path.persist_noclobber(&self.dest_path) {
            let e = if err.error.kind() == io::ErrorKind::AlreadyExists {
                Error::DestinationExists(self.dest_path.clone())
            } else {
                Error::file_io("rename", &self.dest_path, err.error)
            };
            return self.abandon(err.path, e);
        }

        self.state = TxState::Renamed;
        Ok(())
    }

    /// Removes the source after a successful [`publish`](Self::publish).
    pub fn remove_source(&mut self) -> Result<()> {
        self.expect_state(TxState::Renamed, "remove_source")?;
        if let Err(e) = std::fs::remove_file(&self.source_path) {
            let e = Error::PublishFailure {
                path: self.source_path.clone(),
                source: e,
            };
            return self.fail(e);
        }
        self.state = TxState::Published;
        Ok(())
    }

    /// Runs every step in order.
    pub fn run<T, F>(mut self, body: F) -> Result<T>
    where
        F: FnOnce(&mut File, &mut BufWriter<File>) -> Result<T>,
    {
        self.open_source()?;
        self.open_temp()?;
        let out = self.stream(body)?;
        self.publish()?;
        self.remove_source()?;
        Ok(out)
    }

    /// Drops or keeps the temporary file per preference, then fails.
    fn abandon<T>(&mut self, path: TempPath, err: Error) -> Result<T> {
        self.release(path);
        self.fail(err)
    }

    fn release(&self, path: TempPath) {
        if self.keep_failed_temp {
            match path.keep() {
                Ok(p) => crate::displaylevel!(2, "Kept temporary file '{}'\n", p.display()),
                Err(e) => crate::displaylevel!(1, "Unable to keep temporary file: {}\n", e),
            }
        }
        // Otherwise dropping `path` deletes the file.
    }
}

impl Drop for FileTransaction {
    fn drop(&mut self) {
        // Unpublished output: flush and close the file before deciding its fate.
        if let Some(TempOutput { writer, path }) = self.temp.take() {
            drop(writer);
            self.release(path);
        }
    }
}
