//! File status helpers.
//!
//! Type probes for paths, plus capture-and-apply of the metadata a
//! replacement file inherits from the file it replaces: modification time,
//! permission bits, and (on POSIX) ownership.  Timestamps go through the
//! `filetime` crate; ownership through `nix`.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

/// Metadata snapshot carried from a source file to its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub mtime: SystemTime,
    /// Permission bits (`mode & 0o7777`).
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
}

impl FileStat {
    /// Captures the status of an already-open file's metadata.
    pub fn from_metadata(meta: &fs::Metadata) -> Self {
        let mtime = meta.modified().unwrap_or_else(|_| SystemTime::now());

        #[cfg(unix)]
        let (mode, uid, gid) = {
            use std::os::unix::fs::MetadataExt;
            (meta.mode() & 0o7777, meta.uid(), meta.gid())
        };
        #[cfg(not(unix))]
        let (mode, uid, gid) = (if meta.permissions().readonly() { 0o444 } else { 0o644 }, 0, 0);

        FileStat { mtime, mode, uid, gid }
    }

    /// Stats `path`, following symlinks.
    pub fn of(path: &Path) -> io::Result<Self> {
        fs::metadata(path).map(|m| Self::from_metadata(&m))
    }
}

/// What [`set_file_stat`] managed to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatApplied {
    /// `false` when the ownership change was refused (typically: not root
    /// and the source belonged to someone else).
    pub ownership: bool,
}

/// Applies `stat` to the regular file at `path`.
///
/// Modification time and permission bits must succeed; ownership is best
/// effort and reported through the returned [`StatApplied`].  Access time is
/// set to now.
pub fn set_file_stat(path: &Path, stat: &FileStat) -> io::Result<StatApplied> {
    if !is_reg_file(path) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: not a regular file", path.display()),
        ));
    }

    let atime = FileTime::from_system_time(SystemTime::now());
    filetime::set_file_times(path, atime, FileTime::from_system_time(stat.mtime))?;

    #[cfg(unix)]
    let ownership = {
        use nix::unistd::{chown, Gid, Uid};
        chown(path, Some(Uid::from_raw(stat.uid)), Some(Gid::from_raw(stat.gid))).is_ok()
    };
    #[cfg(not(unix))]
    let ownership = true;

    // Permissions last: chown may clear setuid/setgid bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(stat.mode & 0o7777))?;
    }
    #[cfg(not(unix))]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_readonly(stat.mode & 0o200 == 0);
        fs::set_permissions(path, perms)?;
    }

    Ok(StatApplied { ownership })
}

/// Returns `true` if `path` refers to a regular file (symlinks followed).
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if anything, including a dangling symlink, occupies `path`.
pub fn path_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
