//! CLI end-to-end tests, grounded in `faxc-drv/tests/e2e/cli_tests.rs`.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn corec_bin() -> Command {
    Command::cargo_bin("corec").expect("corec binary should build")
}

fn write_source(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write fixture source");
    path
}

#[test]
fn help_output_mentions_usage() {
    let mut cmd = corec_bin();
    cmd.arg("--help");
    cmd.assert().success().stdout(predicate::str::contains("Usage"));
}

#[test]
fn compiles_a_valid_program_and_writes_output() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "empty.src", "program empty is begin end program");
    let out = dir.path().join("empty.out");

    corec_bin()
        .arg(&source)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert!(out.exists(), "output file should have been written");
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("empty_1:"));
    assert!(text.contains("empty_1_begin:"));
}

#[test]
fn type_error_exits_nonzero_and_writes_no_output() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "bad.src",
        "program p is integer a; float b; begin a := b; end program",
    );
    let out = dir.path().join("bad.out");

    corec_bin()
        .arg(&source)
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("type"));

    assert!(!out.exists(), "no output should be written on error");
}

#[test]
fn emit_tokens_prints_the_token_stream_without_compiling() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "tok.src", "program p is begin end program");

    corec_bin()
        .arg(&source)
        .arg("--emit-tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("keyword('program')"));
}

#[test]
fn emit_symbols_lists_global_declarations() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "sym.src",
        "program p is global integer total; begin total := 1; end program",
    );

    corec_bin()
        .arg(&source)
        .arg("--emit-symbols")
        .assert()
        .success()
        .stdout(predicate::str::contains("total"));
}
