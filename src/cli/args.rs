//! Command-line argument parsing for the `qzip` / `qunzip` / `qcat` personas.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//!
//! Options come before the file list; the first argument that does not start
//! with `-` and everything after it are file paths.  A bare `--` also ends
//! options.  A help flag is honoured only as the sole argument.
//!
//! Bad or unrecognised options return an `Err` whose message begins with
//! `"bad usage: "`.  File operands are taken as raw OS strings, so names that
//! are not valid UTF-8 pass through untouched.

use std::ffi::OsStr;
use std::path::PathBuf;

use anyhow::{anyhow, Context};

use crate::cli::arg_utils::{long_command_w_arg, read_u32_from_str};
use crate::cli::constants::DEFAULT_DISPLAY_LEVEL;
use crate::cli::help::is_help_flag;
use crate::cli::persona::Persona;
use crate::io::prefs::{ErrorPolicy, Prefs};

/// Everything the command line asked for.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Persona resolved from the invocation name.
    pub persona: Persona,
    pub prefs: Prefs,
    /// File operands, in order.  Empty means stdin → stdout.
    pub files: Vec<PathBuf>,
    /// Display level after `-v` / `-q`, starting from the default.
    pub display_level: u32,
    /// A help flag was the only argument.
    pub show_help: bool,
}

/// Parse `std::env::args_os()` (skipping argv[0]) for `persona`.
pub fn parse_args(persona: Persona) -> anyhow::Result<ParsedArgs> {
    let argv: Vec<_> = std::env::args_os().skip(1).collect();
    parse_args_from(persona, &argv)
}

/// Parse an explicit argument list (argv[1..]).
pub fn parse_args_from<S: AsRef<OsStr>>(
    persona: Persona,
    argv: &[S],
) -> anyhow::Result<ParsedArgs> {
    let mut parsed = ParsedArgs {
        persona,
        prefs: Prefs::default(),
        files: Vec::new(),
        display_level: DEFAULT_DISPLAY_LEVEL,
        show_help: false,
    };

    if let [only] = argv {
        if only.as_ref().to_str().is_some_and(is_help_flag) {
            parsed.show_help = true;
            return Ok(parsed);
        }
    }

    let mut idx = 0usize;
    while idx < argv.len() {
        let raw = argv[idx].as_ref();
        let bytes = raw.as_encoded_bytes();

        if bytes == b"--" {
            idx += 1;
            break;
        }
        if !bytes.starts_with(b"-") || bytes == b"-" {
            break;
        }

        let argument = raw
            .to_str()
            .ok_or_else(|| anyhow!("bad usage: option is not valid UTF-8: {:?}", raw))?;
        if let Some(rest) = argument.strip_prefix("--") {
            parse_long(rest, &mut parsed)?;
        } else {
            parse_short(&argument[1..], &mut parsed)?;
        }
        idx += 1;
    }

    parsed
        .files
        .extend(argv[idx..].iter().map(|a| PathBuf::from(a.as_ref())));
    Ok(parsed)
}

fn parse_long(option: &str, parsed: &mut ParsedArgs) -> anyhow::Result<()> {
    match option {
        "stop-on-error" => {
            parsed.prefs.set_error_policy(ErrorPolicy::Abort);
        }
        "keep-temp" => {
            parsed.prefs.set_keep_failed_temp(true);
        }
        "verbose" => parsed.display_level += 1,
        "quiet" => parsed.display_level = parsed.display_level.saturating_sub(1),
        _ => {
            if let Some(value) = long_command_w_arg(option, "block-size=") {
                set_block_size(value, parsed)?;
            } else if is_help_flag(&format!("--{option}")) {
                return Err(anyhow!("bad usage: --{option} must be the only argument"));
            } else {
                return Err(anyhow!("bad usage: unknown option --{option}"));
            }
        }
    }
    Ok(())
}

/// Short options may be aggregated (`-vv`, `-qB64K`); `-B` consumes the
/// rest of the argument.
fn parse_short(flags: &str, parsed: &mut ParsedArgs) -> anyhow::Result<()> {
    for (pos, c) in flags.char_indices() {
        match c {
            'v' => parsed.display_level += 1,
            'q' => parsed.display_level = parsed.display_level.saturating_sub(1),
            'B' => {
                set_block_size(&flags[pos + 1..], parsed)?;
                return Ok(());
            }
            'h' | '?' => {
                return Err(anyhow!("bad usage: -{c} must be the only argument"));
            }
            _ => return Err(anyhow!("bad usage: unknown option -{c}")),
        }
    }
    Ok(())
}

fn set_block_size(value: &str, parsed: &mut ParsedArgs) -> anyhow::Result<()> {
    let (size, rest) = read_u32_from_str(value)
        .ok_or_else(|| anyhow!("bad usage: block size expects a number, got '{value}'"))?;
    if !rest.is_empty() {
        return Err(anyhow!("bad usage: trailing characters in block size '{value}'"));
    }
    parsed
        .prefs
        .set_block_size(size as usize)
        .with_context(|| format!("bad usage: block size '{value}'"))?;
    Ok(())
}
