//! Binary entry point for `qzip` and its persona links `qunzip` / `qcat`.
//!
//! # Control flow
//!
//! 1. [`Persona::detect`] maps the basename of `argv[0]` to an operation;
//!    anything unrecognised is a usage error.
//! 2. [`parse_args`] collects options and file operands.
//! 3. [`run`] sends the files (or stdin/stdout when there are none) through
//!    the I/O layer and returns the exit code.

use std::io::IsTerminal;

use qzip::cli::constants::{set_display_level, COMPRESSOR_NAME};
use qzip::cli::help::{print_bad_usage, print_usage};
use qzip::cli::{parse_args, ParsedArgs, Persona};
use qzip::error::{EXIT_IO, EXIT_VALIDATION};
use qzip::io::file_io::{finish_stdout, stdin_reader, stdout_writer};
use qzip::io::{process_files, process_stream, Mode};

/// Execute the parsed command line.  Returns the process exit code.
fn run(args: ParsedArgs) -> i32 {
    let ParsedArgs {
        persona,
        prefs,
        files,
        display_level,
        show_help: _,
    } = args;
    let mode = persona.mode();
    let to_stdout = files.is_empty() || mode.writes_stdout();

    // Payload on stdout: keep stderr to errors unless asked otherwise.
    let level = if to_stdout && display_level == 2 { 1 } else { display_level };
    set_display_level(level);

    qzip::displaylevel!(
        4,
        "*** {} v{}, level {}, block size {} KB ***\n",
        COMPRESSOR_NAME,
        qzip::QZIP_VERSION_STRING,
        prefs.codec.level(),
        prefs.block_size >> 10
    );

    if to_stdout && mode == Mode::Compress && std::io::stdout().is_terminal() {
        qzip::displaylevel!(1, "{}: refusing to write compressed data to a terminal\n", persona.name());
        return EXIT_VALIDATION;
    }

    let mut out = stdout_writer();

    if files.is_empty() {
        let result = process_stream(mode, &mut stdin_reader(), &mut out, &prefs)
            .and_then(|_| finish_stdout(&mut out));
        return match result {
            Ok(()) => 0,
            Err(e) => {
                qzip::displaylevel!(1, "{}: {}\n", persona.name(), e);
                e.exit_code()
            }
        };
    }

    let batch = process_files(mode, &files, &prefs, &mut out);
    if let Err(e) = finish_stdout(&mut out) {
        qzip::displaylevel!(1, "{}: {}\n", persona.name(), e);
        if batch.exit_code == 0 {
            return EXIT_IO;
        }
    }
    batch.exit_code
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let argv0 = std::env::args_os()
        .next()
        .map(|a| a.to_string_lossy().into_owned())
        .unwrap_or_else(|| COMPRESSOR_NAME.to_owned());

    let Some(persona) = Persona::detect(&argv0) else {
        let name = qzip::cli::arg_utils::last_name_from_path(&argv0);
        eprintln!("Unknown executable invocation: '{}'", name);
        print_bad_usage();
    };

    let args = match parse_args(persona) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}: {:#}", persona.name(), e);
            print_bad_usage();
        }
    };

    if args.show_help {
        print_usage();
        std::process::exit(EXIT_VALIDATION);
    }

    std::process::exit(run(args));
}
