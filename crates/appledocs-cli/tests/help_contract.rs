#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

//! Help text is a compatibility contract: flag names and subcommands
//! must not drift without a deliberate change here.

use predicates::prelude::*;

mod common;
use common::appledocs_cmd;

#[test]
fn top_level_help_lists_all_subcommands() {
    let output = appledocs_cmd()
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    for subcommand in [
        "search",
        "doc",
        "technologies",
        "symbols",
        "updates",
        "samples",
        "completions",
    ] {
        assert!(
            stdout.contains(subcommand),
            "help is missing subcommand {subcommand}"
        );
    }
}

#[test]
fn search_help_documents_type_and_limit() {
    appledocs_cmd()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--type"))
        .stdout(predicate::str::contains("--limit"));
}

#[test]
fn doc_help_documents_detail_flags() {
    appledocs_cmd()
        .args(["doc", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--related"))
        .stdout(predicate::str::contains("--references"))
        .stdout(predicate::str::contains("--similar"))
        .stdout(predicate::str::contains("--platform"));
}

#[test]
fn symbols_help_documents_pattern_and_language() {
    appledocs_cmd()
        .args(["symbols", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--pattern"))
        .stdout(predicate::str::contains("--language"));
}

#[test]
fn updates_help_documents_filters() {
    appledocs_cmd()
        .args(["updates", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--category"))
        .stdout(predicate::str::contains("--technology"))
        .stdout(predicate::str::contains("--year"));
}

#[test]
fn completions_generates_a_bash_script() {
    appledocs_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("appledocs"));
}
