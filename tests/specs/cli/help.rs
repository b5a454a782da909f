//! Help and usage specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();

    temp.dsr()
        .args(&["--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("refresh")
        .stdout_has("completions");
}

#[test]
fn refresh_help_documents_criteria_and_overrides() {
    let temp = Project::empty();

    temp.dsr()
        .args(&["refresh", "--help"])
        .passes()
        .stdout_has("--id")
        .stdout_has("--name")
        .stdout_has("--all")
        .stdout_has("--interval")
        .stdout_has("--timeout");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let temp = Project::empty();

    temp.dsr().args(&["explode"]).exits(2);
}

#[test]
fn completions_need_no_configuration() {
    let temp = Project::empty();

    temp.dsr()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("dsr");
}

#[test]
fn version_prints_package_version() {
    let temp = Project::empty();

    let outcome = temp.dsr().args(&["--version"]).passes();

    similar_asserts::assert_eq!(outcome.stdout(), format!("dsr {}\n", env!("CARGO_PKG_VERSION")));
}
