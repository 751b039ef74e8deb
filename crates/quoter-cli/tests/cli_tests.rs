//! Integration tests for the quoter binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A command running in an empty directory with an explicit config file, so
/// that no user configuration leaks into the test.
fn quoter(dir: &TempDir, config: &str) -> Command {
    let path = dir.path().join("quoter.toml");
    fs::write(&path, config).unwrap();
    let mut cmd = Command::cargo_bin("quoter").unwrap();
    cmd.current_dir(dir.path()).arg("--config").arg(path);
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("quoter").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SyntaxFactory"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("quoter").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_quote_expression() {
    let dir = TempDir::new().unwrap();
    quoter(&dir, "")
        .args(["quote", "a+b", "--context", "expression"])
        .assert()
        .success()
        .stdout(
            "SyntaxFactory.BinaryExpression(
    SyntaxKind.AddExpression,
    SyntaxFactory.IdentifierName(\"a\"),
    SyntaxFactory.IdentifierName(\"b\"))
.NormalizeWhitespace()
",
        );
}

#[test]
fn test_flags_shape_output() {
    let dir = TempDir::new().unwrap();
    quoter(&dir, "")
        .args([
            "quote",
            "class C{}",
            "--context",
            "member",
            "--preserve-whitespace",
            "--using-static",
        ])
        .assert()
        .success()
        .stdout(
            "ClassDeclaration(\"C\")
.WithKeyword(
    Token(
        TriviaList(),
        SyntaxKind.ClassKeyword,
        TriviaList(Space)))
",
        );

    quoter(&dir, "")
        .args([
            "quote",
            ";",
            "--context",
            "statement",
            "--preserve-whitespace",
            "--using-static",
        ])
        .assert()
        .success()
        .stdout("EmptyStatement()\n");
}

#[test]
fn test_config_file_sets_defaults() {
    let dir = TempDir::new().unwrap();
    quoter(&dir, "[quoter]\nshorten_with_static_import = true\n")
        .args(["quote", "x", "--context", "expression"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("IdentifierName(\"x\")"));
}

#[test]
fn test_reads_file_and_stdin() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("input.cs");
    fs::write(&source, "return;").unwrap();
    quoter(&dir, "")
        .args(["quote", "--context", "statement", "--file"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("SyntaxFactory.ReturnStatement()"));

    quoter(&dir, "")
        .args(["quote", "--context", "statement"])
        .write_stdin("return;")
        .assert()
        .success()
        .stdout(predicate::str::contains("SyntaxFactory.ReturnStatement()"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let output = quoter(&dir, "")
        .args(["quote", ";", "--context", "statement", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json.to_string().contains("EmptyStatement"));
}

#[test]
fn test_host_policy_messages() {
    let dir = TempDir::new().unwrap();
    quoter(&dir, "")
        .args(["quote", ""])
        .assert()
        .success()
        .stdout("Please specify the source text.\n");

    quoter(&dir, "")
        .args(["check", "  \n", "--preserve-whitespace"])
        .assert()
        .success()
        .stdout("round trip ok\n");

    quoter(&dir, "max_input_length = 5\n")
        .args(["quote", "class C { }"])
        .assert()
        .success()
        .stdout(
            "Only strings shorter than 5 characters are supported; your input is 11 characters long.\n",
        );

    quoter(&dir, "")
        .args(["quote", "using System;", "--context", "member"])
        .assert()
        .success()
        .stdout("Parse error\n");
}

#[test]
fn test_check_round_trip() {
    let dir = TempDir::new().unwrap();
    for exact in [false, true] {
        let mut cmd = quoter(&dir, "");
        cmd.args(["check", "class Broken { int x = 0x1F; /* c */ void M() { if (a) return; }"]);
        if exact {
            cmd.arg("--preserve-whitespace");
        }
        cmd.assert().success().stdout("round trip ok\n");
    }
}

#[test]
fn test_tree_outline() {
    let dir = TempDir::new().unwrap();
    quoter(&dir, "")
        .args(["tree", "return x;", "--context", "statement"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ReturnStatement\n"))
        .stdout(predicate::str::contains("IdentifierName"));
}

#[test]
fn test_malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    quoter(&dir, "max_input_length = [")
        .args(["quote", "x"])
        .assert()
        .failure();
}
