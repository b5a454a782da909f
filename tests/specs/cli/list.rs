//! `dsr list` specs

use crate::prelude::*;

fn two_stores() -> FlowiseStub {
    FlowiseStub::start(|method, path| match (method, path) {
        ("GET", "/api/v1/document-store/store") => (
            200,
            format!(
                "[{},{}]",
                store_json("aaaa1111-2222", "Manuals", "UPSERTED", 1234),
                store_json("bbbb3333-4444", "Wiki", "SYNCING", 10)
            ),
        ),
        _ => (404, r#"{"message":"not found"}"#.to_string()),
    })
}

#[test]
fn list_shows_stores_grouped_by_status() {
    let server = two_stores();
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&["list"])
        .passes()
        .stdout_has("Document Stores (2 total)")
        .stdout_has("   - SYNCING: 1 store(s)")
        .stdout_has("   - UPSERTED: 1 store(s)")
        .stdout_has("     Chunks: 1,234");

    let seen = server.seen();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer spec-key"));
}

#[test]
fn list_json_is_parseable() {
    let server = two_stores();
    let temp = Project::empty();

    let outcome = temp
        .dsr_against(&server)
        .args(&["list", "--output", "json"])
        .passes();
    let json: serde_json::Value = serde_json::from_str(&outcome.stdout()).unwrap();

    assert_eq!(json["total"], 2);
    assert_eq!(json["stores"][1]["name"], "Wiki");
}

#[test]
fn non_array_response_lists_nothing() {
    let server = FlowiseStub::start(|_, _| (200, r#"{"data":[]}"#.to_string()));
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&["list"])
        .passes()
        .stdout_has("No document stores found.");
}

#[test]
fn unauthorized_list_suggests_checking_the_key() {
    let server = FlowiseStub::start(|_, _| (401, r#"{"message":"Unauthorized"}"#.to_string()));
    let temp = Project::empty();

    temp.dsr_against(&server)
        .args(&["list"])
        .fails()
        .stderr_has("HTTP 401: Unauthorized")
        .stderr_has("Check that FLOWISE_API_KEY is valid");
}
