// e2e/cli_integration.rs: black-box tests of the qzip / qunzip / qcat binary.
//
// The binary is run through std::process::Command.  The other personas are
// reached through symlinks named after them, so these run on unix only.

#![cfg(unix)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use qzip::config::COMPRESSION_LEVEL;
use tempfile::TempDir;

/// Locate the `qzip` binary produced by Cargo.
fn qzip_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_qzip") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("qzip");
    p
}

/// A scratch directory with the binary linked in under every persona name.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let bin = qzip_bin();
        for name in ["qzip", "qunzip", "qcat"] {
            let link = dir.path().join(format!("{name}{COMPRESSION_LEVEL}"));
            std::os::unix::fs::symlink(&bin, link).unwrap();
        }
        Sandbox { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn file(&self, name: &str, content: &[u8]) -> PathBuf {
        let p = self.path().join(name);
        fs::write(&p, content).unwrap();
        p
    }

    fn cmd(&self, persona: &str) -> Command {
        let mut c = Command::new(self.path().join(format!("{persona}{COMPRESSION_LEVEL}")));
        c.current_dir(self.path());
        c
    }

    fn run(&self, persona: &str, args: &[&str]) -> Output {
        self.cmd(persona)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .expect("failed to spawn")
    }

    fn pipe(&self, persona: &str, args: &[&str], input: &[u8]) -> Output {
        let mut child = self
            .cmd(persona)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn");
        // Feed stdin from a thread so a large output cannot deadlock.
        let mut stdin = child.stdin.take().unwrap();
        let data = input.to_vec();
        let feeder = std::thread::spawn(move || stdin.write_all(&data));
        let out = child.wait_with_output().unwrap();
        feeder.join().unwrap().unwrap();
        out
    }

    fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| !n.starts_with('q'))
            .collect();
        names.sort();
        names
    }
}

fn suffix() -> String {
    format!(".qz{COMPRESSION_LEVEL}")
}

fn text(n: usize) -> Vec<u8> {
    "Kilroy was here; the quick brown fox.\n"
        .repeat(n / 38 + 1)
        .into_bytes()[..n]
        .to_vec()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ── 1. File round trip ───────────────────────────────────────────────────────

#[test]
fn compress_then_decompress_restores_file() {
    let sb = Sandbox::new();
    let data = text(200_000);
    sb.file("log.txt", &data);

    let out = sb.run("qzip", &["log.txt"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(sb.entries(), vec![format!("log.txt{}", suffix())]);

    let out = sb.run("qunzip", &[&format!("log.txt{}", suffix())]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(sb.entries(), vec!["log.txt".to_string()]);
    assert_eq!(fs::read(sb.path().join("log.txt")).unwrap(), data);
}

// ── 2. Suffix and collision checks ───────────────────────────────────────────

#[test]
fn qunzip_without_suffix_fails_untouched() {
    let sb = Sandbox::new();
    sb.file("report.txt", b"not compressed");

    let out = sb.run("qunzip", &["report.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("report.txt"));
    assert_eq!(sb.entries(), vec!["report.txt".to_string()]);
    assert_eq!(fs::read(sb.path().join("report.txt")).unwrap(), b"not compressed");
}

#[test]
fn existing_destination_is_never_overwritten() {
    let sb = Sandbox::new();
    sb.file("doc", b"new");
    let dst = sb.file(&format!("doc{}", suffix()), b"old archive");

    let out = sb.run("qzip", &["doc"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Will not overwrite"));
    assert_eq!(fs::read(dst).unwrap(), b"old archive");
    assert_eq!(fs::read(sb.path().join("doc")).unwrap(), b"new");
}

#[test]
fn missing_file_is_io_error() {
    let sb = Sandbox::new();
    let out = sb.run("qzip", &["nowhere"]);
    assert_eq!(out.status.code(), Some(2));
}

// ── 3. Standard streams ──────────────────────────────────────────────────────

#[test]
fn empty_stdin_gives_empty_stdout() {
    let sb = Sandbox::new();
    let out = sb.run("qzip", &[]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(out.stdout.is_empty());
}

#[test]
fn pipe_round_trip() {
    let sb = Sandbox::new();
    let data = text(3 * 1024 * 1024 + 5);

    let packed = sb.pipe("qzip", &[], &data);
    assert!(packed.status.success(), "{}", stderr(&packed));
    assert!(packed.stdout.len() < data.len());

    let restored = sb.pipe("qcat", &[], &packed.stdout);
    assert!(restored.status.success(), "{}", stderr(&restored));
    assert_eq!(restored.stdout, data);

    let again = sb.pipe("qunzip", &[], &packed.stdout);
    assert_eq!(again.stdout, data);
}

#[test]
fn truncated_stdin_fails_validation() {
    let sb = Sandbox::new();
    let packed = sb.pipe("qzip", &[], &text(10_000));
    let cut = &packed.stdout[..packed.stdout.len() - 3];
    let out = sb.pipe("qcat", &[], cut);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn qcat_keeps_compressed_file() {
    let sb = Sandbox::new();
    let data = text(5_000);
    sb.file("keep", &data);
    assert!(sb.run("qzip", &["keep"]).status.success());
    let name = format!("keep{}", suffix());

    let out = sb.run("qcat", &[&name]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(out.stdout, data);
    assert_eq!(sb.entries(), vec![name]);
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_file_name_round_trip() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let sb = Sandbox::new();
    let name = OsStr::from_bytes(b"r\xe9sum\xe9.txt");
    let data = text(4_000);
    fs::write(sb.path().join(name), &data).unwrap();

    let out = sb.cmd("qzip").arg(name).stdin(Stdio::null()).output().unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    let mut packed = name.to_owned();
    packed.push(suffix());
    assert!(sb.path().join(&packed).exists());
    assert!(!sb.path().join(name).exists());

    let out = sb.cmd("qunzip").arg(&packed).stdin(Stdio::null()).output().unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(fs::read(sb.path().join(name)).unwrap(), data);
}

// ── 4. Multiple files ────────────────────────────────────────────────────────

#[test]
fn failures_do_not_stop_the_batch() {
    let sb = Sandbox::new();
    sb.file("a", b"alpha");
    sb.file("c", b"gamma");

    let out = sb.run("qzip", &["a", "b", "c"]);
    assert_eq!(out.status.code(), Some(2));
    let s = suffix();
    assert_eq!(sb.entries(), vec![format!("a{s}"), format!("c{s}")]);
}

#[test]
fn stop_on_error_skips_the_rest() {
    let sb = Sandbox::new();
    sb.file("c", b"gamma");

    let out = sb.run("qzip", &["--stop-on-error", "b", "c"]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(sb.entries(), vec!["c".to_string()]);
}

// ── 5. Usage ─────────────────────────────────────────────────────────────────

#[test]
fn help_prints_usage_and_exits_one() {
    let sb = Sandbox::new();
    for flag in ["-h", "--help"] {
        let out = sb.run("qzip", &[flag]);
        assert_eq!(out.status.code(), Some(1));
        assert!(stderr(&out).contains("Usage"));
    }
}

#[test]
fn unknown_option_is_bad_usage() {
    let sb = Sandbox::new();
    sb.file("f", b"x");
    let out = sb.run("qzip", &["-Z", "f"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("bad usage"));
    assert_eq!(sb.entries(), vec!["f".to_string()]);
}

#[test]
fn unknown_invocation_name_is_rejected() {
    let sb = Sandbox::new();
    let link = sb.path().join("gzipper");
    std::os::unix::fs::symlink(qzip_bin(), &link).unwrap();

    let out = Command::new(&link).stdin(Stdio::null()).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unknown executable invocation: 'gzipper'"));
}
