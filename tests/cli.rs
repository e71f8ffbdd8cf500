#![cfg(feature = "cli")]

mod common;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use abnt_docx::Document;
use common::{metadata, paragraph, title};

fn write_document(name: &str, document: &Document) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("abnt-docx-cli-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("document.json");
    std::fs::write(&path, document.to_json().expect("serialize")).expect("write json");
    path
}

fn run(args: &[&str], input: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_abnt-docx"))
        .args(args)
        .arg(input)
        .output()
        .expect("run abnt-docx")
}

fn without_advisors() -> Document {
    let mut metadata = metadata();
    metadata.advisors.clear();
    Document {
        metadata,
        blocks: vec![title("h1", 1, 1, "Introdução"), paragraph("p1", 2, "Texto")],
    }
}

#[test]
fn check_requires_advisor_for_title_page() {
    common::init_logging();
    let input = write_document("advisor", &without_advisors());

    let output = run(&["check"], &input);
    assert!(!output.status.success());

    let output = run(&["check", "--no-title-page"], &input);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("2 blocks, 1 table of contents entries"), "{stdout}");

    if let Some(dir) = input.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn check_reports_complete_document() {
    let mut document = without_advisors();
    document.metadata = metadata();
    let input = write_document("complete", &document);

    let output = run(&["check"], &input);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));

    if let Some(dir) = input.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
