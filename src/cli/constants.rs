// cli/constants.rs: program identity, persona names, and display globals.

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity constants ────────────────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "qzip";
pub const QZIP: &str = "qzip";
pub const QUNZIP: &str = "qunzip";
pub const QCAT: &str = "qcat";

/// Prefix of the level-tagged file suffix (`.qz` + level digit).
pub const QZ_EXTENSION_PREFIX: &str = ".qz";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = results (downgraded to 1 when the
// payload goes to stdout); 3 = progress; 4 = verbose.
pub const DEFAULT_DISPLAY_LEVEL: u32 = 2;
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(DEFAULT_DISPLAY_LEVEL);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Display helpers ───────────────────────────────────────────────────────────

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
