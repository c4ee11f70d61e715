// cli/help.rs: usage text and usage-error exits.

use crate::cli::constants::{QCAT, QUNZIP, QZIP, QZ_EXTENSION_PREFIX};
use crate::config::{COMPRESSION_LEVEL, MAX_BUF_SIZE};
use crate::error::EXIT_VALIDATION;

/// Help flags recognised when given as the only argument.
pub const HELP_FLAGS: [&str; 4] = ["-h", "-?", "--help", "-help"];

/// Returns `true` if `arg` is one of [`HELP_FLAGS`].
pub fn is_help_flag(arg: &str) -> bool {
    HELP_FLAGS.contains(&arg)
}

/// Full usage text, level digit and suffix filled in for this build.
pub fn usage_text() -> String {
    let l = COMPRESSION_LEVEL;
    let ext = format!("{QZ_EXTENSION_PREFIX}{l}");
    format!(
        "{QZIP} v{}\n\
         Usage:\n\
         \x20 {QZIP}{l} [options] [file ...]    compress each file to file{ext}\n\
         \x20 {QUNZIP}{l} [options] [file ...]  decompress each file{ext} to file\n\
         \x20 {QCAT}{l} [options] [file ...]    decompress each file{ext} to stdout\n\
         \n\
         With no file, read standard input and write standard output.\n\
         Originals are removed only after the new file is fully written.\n\
         Existing files are never overwritten.\n\
         \n\
         Options:\n\
         \x20 -v               more messages (repeatable)\n\
         \x20 -q               fewer messages (repeatable)\n\
         \x20 -B#              block size in bytes, K/M suffix allowed (default: {}K)\n\
         \x20 --block-size=#   same as -B#\n\
         \x20 --stop-on-error  skip remaining files after the first failure\n\
         \x20 --keep-temp      leave the temporary file behind on failure\n\
         \x20 --               end of options\n\
         \x20 -h, --help       show this help and exit\n",
        crate::QZIP_VERSION_STRING,
        MAX_BUF_SIZE >> 10
    )
}

/// Print usage to stderr.
pub fn print_usage() {
    eprint!("{}", usage_text());
}

/// Print usage and exit with the validation code.
pub fn print_bad_usage() -> ! {
    print_usage();
    std::process::exit(EXIT_VALIDATION);
}
