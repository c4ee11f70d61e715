// Integration tests for src/cli/help.rs.

use qzip::cli::help::{is_help_flag, usage_text, HELP_FLAGS};

#[test]
fn every_help_flag_recognised() {
    assert!(HELP_FLAGS.iter().all(|f| is_help_flag(f)));
    assert!(!is_help_flag("-v"));
    assert!(!is_help_flag("help"));
}

#[test]
fn usage_describes_options() {
    let text = usage_text();
    for needle in ["-B#", "--block-size=#", "--keep-temp", "--stop-on-error", "standard input"] {
        assert!(text.contains(needle), "missing {needle}");
    }
}
