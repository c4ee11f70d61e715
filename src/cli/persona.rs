//! Invocation-name personas.
//!
//! One binary, three behaviours, chosen once from the basename of `argv[0]`:
//!
//! | Name             | Persona                 |
//! |------------------|-------------------------|
//! | `qzip[N]`        | compress                |
//! | `qunzip[N]`      | decompress to file      |
//! | `qcat[N]`        | decompress to stdout    |
//!
//! `N` is the build's compression level digit; any extension after the name
//! (such as `.exe`) is ignored.  Nothing below the CLI looks at the name;
//! it receives a [`Mode`] instead.

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::constants::{QCAT, QUNZIP, QZIP};
use crate::config::COMPRESSION_LEVEL;
use crate::io::Mode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persona {
    Compress,
    Decompress,
    DecompressToStdout,
}

impl Persona {
    const NAMES: [(&'static str, Persona); 3] = [
        (QZIP, Persona::Compress),
        (QUNZIP, Persona::Decompress),
        (QCAT, Persona::DecompressToStdout),
    ];

    /// Resolves the persona from `argv[0]`, which may be a full path.
    pub fn detect(argv0: &str) -> Option<Persona> {
        let exe = last_name_from_path(argv0);
        Self::NAMES.iter().find_map(|&(name, persona)| {
            let tagged = format!("{name}{COMPRESSION_LEVEL}");
            (exe_name_match(exe, name) || exe_name_match(exe, &tagged)).then_some(persona)
        })
    }

    /// The operation this persona runs.
    pub fn mode(self) -> Mode {
        match self {
            Persona::Compress => Mode::Compress,
            Persona::Decompress => Mode::Decompress,
            Persona::DecompressToStdout => Mode::DecompressToStdout,
        }
    }

    /// Canonical command name, without level digit.
    pub fn name(self) -> &'static str {
        match self {
            Persona::Compress => QZIP,
            Persona::Decompress => QUNZIP,
            Persona::DecompressToStdout => QCAT,
        }
    }
}
