use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// `qac` running in `dir` with an empty config, so the user's own config
/// never leaks into a test.
fn qac(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("qac");
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("no-config.toml"));
    cmd
}

#[test]
fn list_generators() {
    let dir = TempDir::new().unwrap();
    qac(&dir)
        .arg("--list-generators")
        .assert()
        .success()
        .stdout("html - Standalone HTML page\nanki - Anki import file (tab separated)\n");
}

#[test]
fn html_to_stdout_by_default() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "deck.qa", "Q: What is *Rust*?\nA: A language.\n");

    qac(&dir).arg("deck.qa").assert().success().stdout(
        predicate::str::starts_with("<!DOCTYPE html>").and(predicate::str::contains(
            "<h4><span>Question 1</span>What is <strong>Rust</strong>?</h4>",
        )),
    );
}

#[test]
fn anki_to_output_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "deck.qa",
        "CHA: Basics\nQ: One?\nA: Two.\n",
    );

    qac(&dir)
        .args(["deck.qa", "-g", "anki", "-o", "out/deck.txt"])
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(dir.path().join("out/deck.txt")).unwrap();
    assert_eq!(written, "One?\tTwo.\tChapter_1 Basics\n");
}

#[test]
fn caption_flags_rename_headings() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "deck.qa", "CHA: Basics\nQ: One?\nA: Two.\n");

    qac(&dir)
        .args(["deck.qa", "--chapter", "Kapitel", "--question", "Frage"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("<span>Kapitel 1</span>Basics")
                .and(predicate::str::contains("<span>Frage 1</span>One?")),
        );
}

#[test]
fn config_file_selects_generator() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "deck.qa", "Q: One?\nA: Two.\n");
    let config = write(dir.path(), "qac.toml", "generator = \"anki\"\n");

    cargo_bin_cmd!("qac")
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("deck.qa")
        .assert()
        .success()
        .stdout("One?\tTwo.\t\n");
}

#[test]
fn offline_uses_local_mathjax() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "deck.qa", "Q: One?\nA: \\(x\\)\n");

    qac(&dir)
        .args(["deck.qa", "--offline"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("MathJax/tex-mml-chtml.js")
                .and(predicate::str::contains("cdn.jsdelivr.net").not()),
        );
}

#[test]
fn print_tokens_and_cst_without_rendering() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "deck.qa", "Q: x\nA: y\n");

    qac(&dir)
        .args(["deck.qa", "--print-tokens", "--print-cst", "--no-render"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("QUESTION@1[Q:]")
                .and(predicate::str::contains("RootQuestions"))
                .and(predicate::str::contains("<html").not()),
        );
}

#[test]
fn includes_resolve_against_working_directory() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "part.qa", "Q: Inner?\nA: Yes.\n");
    write(
        dir.path(),
        "main.qa",
        "Q: Outer?\nA: Yes.\nFILE: part.qa\nFILE: part.qa\n",
    );

    qac(&dir)
        .args(["main.qa", "-g", "anki"])
        .assert()
        .success()
        .stdout("Outer?\tYes.\t\nInner?\tYes.\t\n");
}

#[test]
fn syntax_error_fails_without_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "broken.qa", "Q: one\nQ: two\nA: x\n");

    qac(&dir)
        .args(["broken.qa", "-o", "out.html"])
        .assert()
        .failure()
        .stderr("Error: line 2: expected ANSWER but found QUESTION\n");

    assert!(!dir.path().join("out.html").exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();

    qac(&dir)
        .arg("missing.qa")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: missing.qa"));
}

#[test]
fn unknown_generator_is_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "deck.qa", "Q: x\nA: y\n");

    qac(&dir)
        .args(["deck.qa", "-g", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unknown generator 'pdf' (available: html, anki)",
        ));
}
