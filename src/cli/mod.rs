//! Command-line interface for the `qzip` binary and its persona links.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program and persona names, the `DISPLAY_LEVEL` atomic, display macros. |
//! | [`help`]      | Usage text and the usage-error exit. |
//! | [`arg_utils`] | Path basename, executable-name matching, size parsing. |
//! | [`persona`]   | `Persona` resolved from `argv[0]`. |
//! | [`args`]      | `ParsedArgs`: options and file operands. |
//!
//! Typical call sequence: `Persona::detect` → `parse_args` → `io::process_files`
//! or `io::process_stream`.

pub mod constants;
pub mod help;
pub mod arg_utils;
pub mod persona;
pub mod args;

pub use args::{parse_args, parse_args_from, ParsedArgs};
pub use persona::Persona;
