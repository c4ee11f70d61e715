// Integration tests for src/cli/persona.rs: invocation-name dispatch.

use qzip::cli::Persona;
use qzip::config::COMPRESSION_LEVEL;
use qzip::io::Mode;

#[test]
fn level_tagged_names() {
    let l = COMPRESSION_LEVEL;
    assert_eq!(Persona::detect(&format!("qzip{l}")), Some(Persona::Compress));
    assert_eq!(Persona::detect(&format!("qunzip{l}")), Some(Persona::Decompress));
    assert_eq!(Persona::detect(&format!("qcat{l}")), Some(Persona::DecompressToStdout));
}

#[test]
fn full_paths_and_extensions() {
    assert_eq!(Persona::detect("/usr/local/bin/qunzip"), Some(Persona::Decompress));
    assert_eq!(Persona::detect("./target/debug/qzip"), Some(Persona::Compress));
    assert_eq!(Persona::detect("C:\\tools\\qcat.exe"), Some(Persona::DecompressToStdout));
}

#[test]
fn unknown_names_rejected() {
    let other = if COMPRESSION_LEVEL == 1 { 2 } else { 1 };
    for name in ["gzip", "qzipper", "unqzip", "", format!("qzip{other}").as_str()] {
        assert_eq!(Persona::detect(name), None, "{name:?}");
    }
}

#[test]
fn persona_maps_to_mode() {
    assert_eq!(Persona::Compress.mode(), Mode::Compress);
    assert_eq!(Persona::Decompress.mode(), Mode::Decompress);
    assert_eq!(Persona::DecompressToStdout.mode(), Mode::DecompressToStdout);
    assert!(Persona::DecompressToStdout.mode().writes_stdout());
    assert!(!Persona::Decompress.mode().writes_stdout());
    assert_eq!(Persona::DecompressToStdout.name(), "qcat");
}
