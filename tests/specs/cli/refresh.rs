//! `dsr refresh` specs
//!
//! Runs use a one-second status interval against a stub server.

use crate::prelude::*;

const MANUALS: &str = "aaaa1111-2222";
const WIKI: &str = "bbbb3333-4444";

/// Stub where triggers answer `trigger` and every status check reports `polled`
fn flowise(trigger: (u16, &'static str), polled: &'static str) -> FlowiseStub {
    FlowiseStub::start(move |method, path| {
        let list = format!(
            "[{},{}]",
            store_json(MANUALS, "Manuals", "UPSERTED", 100),
            store_json(WIKI, "Wiki", "SYNCING", 10)
        );
        match (method, path.trim_start_matches("/api/v1/document-store")) {
            ("GET", "/store") => (200, list),
            ("GET", p) if p.starts_with("/store/") => {
                let id = &p["/store/".len()..];
                (200, store_json(id, "Manuals", polled, 150))
            }
            ("POST", p) if p.starts_with("/refresh/") => (trigger.0, trigger.1.to_string()),
            _ => (404, r#"{"message":"not found"}"#.to_string()),
        }
    })
}

fn refresh_args<'a>(extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["refresh", "--interval", "1"];
    args.extend_from_slice(extra);
    args
}

#[test]
fn refresh_by_name_succeeds_and_exits_zero() {
    let server = flowise((200, "{}"), "SYNC");
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&refresh_args(&["--name", "manu", "--yes"]))
        .passes()
        .stdout_has("Will refresh 1 store(s):")
        .stdout_has("Started refresh for: Manuals")
        .stdout_has("Manuals: SYNC (Ready) [Check #1]")
        .stdout_has("Chunks Added: +50")
        .stdout_has("Total: 1 | Successful: 1 | Failed: 0 | Timed out: 0");

    let triggers: Vec<_> = server
        .seen()
        .into_iter()
        .filter(|s| s.method == "POST")
        .map(|s| s.path)
        .collect();
    assert_eq!(triggers, [format!("/api/v1/document-store/refresh/{}", MANUALS)]);
}

#[test]
fn rejected_trigger_exits_one() {
    let server = flowise((409, r#"{"message":"Store is busy"}"#), "SYNC");
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&refresh_args(&["--id", "aaaa", "--yes"]))
        .exits(1)
        .stdout_has("Result: FAILED - refresh rejected: Store is busy");
}

#[test]
fn stuck_store_times_out_and_exits_one() {
    let server = flowise((200, "{}"), "UPSERTING");
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&refresh_args(&["--id", MANUALS, "--timeout", "2", "--yes"]))
        .exits(1)
        .stdout_has("Result: TIMED OUT")
        .stdout_has("last status: UPSERTING");
}

#[test]
fn busy_store_is_skipped_with_reason() {
    let server = flowise((200, "{}"), "SYNC");
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&refresh_args(&["--name", "wiki", "--yes"]))
        .passes()
        .stdout_has("Wiki (ID: bbbb3333..., Status: SYNCING): refresh already in progress")
        .stdout_lacks("Refresh Summary");
}

#[test]
fn unmatched_criteria_exit_one() {
    let server = flowise((200, "{}"), "SYNC");
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&refresh_args(&["--name", "nope"]))
        .exits(1)
        .stderr_has("No stores matched your criteria");
}

#[test]
fn interactive_selection_reads_stdin() {
    let server = flowise((200, "{}"), "SYNC");
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&refresh_args(&[]))
        .stdin("1\ny\n")
        .passes()
        .stdout_has("  1. Manuals")
        .stdout_has("Proceed with refresh? (y/n):")
        .stdout_has("Successful: 1");
}

#[test]
fn interactive_quit_exits_zero_without_refreshing() {
    let server = flowise((200, "{}"), "SYNC");
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&refresh_args(&[]))
        .stdin("q\n")
        .passes()
        .stdout_has("Exiting...");

    assert!(server.seen().iter().all(|s| s.method == "GET"));
}

#[test]
fn json_summary_keeps_progress_off_stdout() {
    let server = flowise((200, "{}"), "SYNC");
    let temp = Project::empty();

    let outcome = temp
        .dsr_against(&server)
        .args(&refresh_args(&["--all", "--yes", "--output", "json"]))
        .passes()
        .stderr_has("Started refresh for: Manuals");
    let json: serde_json::Value = serde_json::from_str(&outcome.stdout()).unwrap();

    assert_eq!(json["total"], 1);
    assert_eq!(json["stores"][0]["store_name"], "Manuals");
    assert_eq!(json["stores"][0]["result"]["kind"], "success");
}
