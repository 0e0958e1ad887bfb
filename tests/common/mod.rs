#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::{ChildPath, FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::Words;
use rstest::fixture;
use std::path::Path;

const TMPDIR: &str = "../playground";

pub fn redirect_temp_dir() {
    unsafe {
        std::env::set_var("TMPDIR", TMPDIR);
    }

    // Ensure the TMPDIR exists
    if !std::path::Path::new(TMPDIR).exists() {
        std::fs::create_dir_all(TMPDIR).expect("Failed to create TMPDIR");
    }
}

#[fixture]
pub fn documents_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

pub fn write_document(dir: &TempDir, name: &str, markup: &str) -> ChildPath {
    let document = dir.child(name);
    document
        .write_str(markup)
        .expect("Failed to write document");
    document
}

pub fn page(body: &str) -> String {
    format!("<html><head><title>Page</title></head><body>{body}</body></html>")
}

/// A paragraph of random words, never empty.
pub fn random_paragraph() -> String {
    let words: Vec<String> = Words(3..12).fake();
    format!("<p>{}</p>", words.join(" "))
}

pub fn run_antar_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("antar").expect("Failed to find antar binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
