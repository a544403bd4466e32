//! End-to-end tests running the `asc` binary against a mock API server.

mod common;

use common::TestHarness;
use common::asc_cmd;
use common::fixtures_path;
use common::stderr_json;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn apps_page() -> serde_json::Value {
    json!({
        "data": [
            {
                "type": "apps",
                "id": "1",
                "attributes": { "name": "Demo", "bundleId": "com.example.demo" }
            }
        ],
        "links": { "self": "{base}/v1/apps", "next": "{base}/v1/apps?cursor=2" }
    })
}

fn apps_last_page() -> serde_json::Value {
    json!({
        "data": [
            {
                "type": "apps",
                "id": "2",
                "attributes": { "name": "Second | App", "bundleId": "com.example.two" }
            }
        ],
        "links": { "self": "{base}/v1/apps?cursor=2" }
    })
}

#[test]
fn test_apps_list_sends_filters_and_bearer_token() {
    let h = TestHarness::new();
    h.api().set_response("GET /v1/apps", 200, apps_page());

    let out = h.run_json(&["apps", "list", "--bundle-id", "com.example.demo", "--limit", "5"]);
    assert_eq!(out["data"][0]["id"], "1");
    assert!(out["links"]["next"].as_str().unwrap().ends_with("/v1/apps?cursor=2"));

    let requests = h.requests_for("GET", "/v1/apps");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].query_value("filter[bundleId]").as_deref(),
        Some("com.example.demo")
    );
    assert_eq!(requests[0].query_value("limit").as_deref(), Some("5"));
    assert!(requests[0]
        .authorization
        .as_deref()
        .unwrap()
        .starts_with("Bearer "));
}

#[test]
fn test_paginate_merges_every_page() {
    let h = TestHarness::new();
    h.api().set_response("GET /v1/apps", 200, apps_page());
    h.api().set_response("GET /v1/apps?cursor=2", 200, apps_last_page());

    let out = h.run_json(&["apps", "list", "--paginate"]);
    let ids: Vec<&str> = out["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(out["links"].get("next").is_none());

    let requests = h.requests_for("GET", "/v1/apps");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].query_value("limit").as_deref(), Some("200"));
}

#[test]
fn test_next_url_continues_listing() {
    let h = TestHarness::new();
    h.api().set_response("GET /v1/apps?cursor=2", 200, apps_last_page());
    let next = format!("{}/v1/apps?cursor=2", h.api().base_url());

    let out = h.run_json(&["apps", "list", "--next", &next]);
    assert_eq!(out["data"][0]["id"], "2");
}

#[test]
fn test_foreign_next_url_is_rejected_without_a_request() {
    let h = TestHarness::new();
    let assert = h
        .run(&["apps", "list", "--next", "https://evil.example/v1/apps?cursor=2"])
        .code(64);
    let err = stderr_json(&assert);
    assert_eq!(err["error"]["category"], "invalid_input");
    assert!(h.requests().is_empty());
}

#[test]
fn test_table_output_and_pagination_hint() {
    let h = TestHarness::new();
    h.api().set_response("GET /v1/apps", 200, apps_page());

    h.run(&["apps", "list", "--output", "table"])
        .success()
        .stdout(predicate::str::contains("id"))
        .stdout(predicate::str::contains("bundleId"))
        .stdout(predicate::str::contains("com.example.demo"))
        .stderr(predicate::str::contains("More results available: --next"));
}

#[test]
fn test_markdown_output_escapes_pipes() {
    let h = TestHarness::new();
    h.api().set_response("GET /v1/apps", 200, apps_last_page());

    h.run(&["apps", "list", "-o", "markdown"])
        .success()
        .stdout(predicate::str::starts_with("| id | type | name | bundleId |"))
        .stdout(predicate::str::contains("| --- | --- | --- | --- |"))
        .stdout(predicate::str::contains("Second \\| App"));
}

#[test]
fn test_builds_latest_with_next() {
    let h = TestHarness::new();
    h.api().set_response(
        "GET /v1/builds",
        200,
        json!({
            "data": [
                { "type": "builds", "id": "b1", "attributes": { "version": "99" } },
                { "type": "builds", "id": "b2", "attributes": { "version": "100" } }
            ],
            "links": {}
        }),
    );
    h.api().set_response(
        "GET /v1/apps/app1/buildUploads",
        200,
        json!({
            "data": [
                { "type": "buildUploads", "id": "u1", "attributes": { "cfBundleVersion": "101" } }
            ],
            "links": {}
        }),
    );

    let out = h.run_json(&[
        "builds", "latest", "--app", "app1", "--version", "1.2", "--platform", "ios", "--next",
    ]);
    assert_eq!(out["latestProcessedBuildNumber"], "100");
    assert_eq!(out["latestUploadBuildNumber"], "101");
    assert_eq!(out["latestBuildNumber"], "101");
    assert_eq!(out["source"], "upload");
    assert_eq!(out["buildId"], "u1");
    assert_eq!(out["nextBuildNumber"], "102");

    let builds = h.requests_for("GET", "/v1/builds");
    assert_eq!(builds[0].query_value("filter[app]").as_deref(), Some("app1"));
    assert_eq!(
        builds[0].query_value("filter[preReleaseVersion.platform]").as_deref(),
        Some("IOS")
    );
    let uploads = h.requests_for("GET", "/v1/apps/app1/buildUploads");
    assert_eq!(
        uploads[0].query_value("filter[state]").as_deref(),
        Some("AWAITING_UPLOAD,PROCESSING")
    );
}

#[test]
fn test_builds_latest_without_any_build_is_not_found() {
    let h = TestHarness::new();
    let empty = json!({ "data": [], "links": {} });
    h.api().set_response("GET /v1/builds", 200, empty.clone());
    h.api()
        .set_response("GET /v1/apps/app1/buildUploads", 200, empty);

    let assert = h.run(&["builds", "latest", "--app", "app1"]).code(69);
    let err = stderr_json(&assert);
    assert_eq!(err["error"]["category"], "not_found");
}

#[test]
fn test_api_404_exits_not_found_with_text_error() {
    let h = TestHarness::new();
    h.run(&["builds", "get", "--id", "missing", "-o", "table"])
        .code(69)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_add_groups_posts_linkage() {
    let h = TestHarness::new();
    h.api()
        .set_empty_response("POST /v1/builds/b1/relationships/betaGroups", 204);

    let out = h.run_json(&["builds", "add-groups", "--id", "b1", "--group", "g1, g2,"]);
    assert_eq!(out["added"], json!(["g1", "g2"]));

    let posts = h.requests_for("POST", "/v1/builds/b1/relationships/betaGroups");
    assert_eq!(
        posts[0].body.as_ref().unwrap()["data"],
        json!([
            { "type": "betaGroups", "id": "g1" },
            { "type": "betaGroups", "id": "g2" }
        ])
    );
}

#[test]
fn test_destructive_command_requires_confirm() {
    let h = TestHarness::new();
    let assert = h.run(&["builds", "expire", "--id", "b1"]).code(64);
    let err = stderr_json(&assert);
    assert!(err["error"]["message"]
        .as_str()
        .unwrap()
        .contains("--confirm"));
    assert!(h.requests().is_empty());
}

#[test]
fn test_invalid_flag_values_exit_usage_without_network() {
    let h = TestHarness::new();
    h.run(&["apps", "list", "--limit", "500"]).code(64);
    h.run(&["marketplace", "webhooks", "create", "--url", "http://example.com/hook", "--secret", "s"])
        .code(64);
    h.run(&["iap", "list", "--app", "app1", "--type", "SUBSCRIPTION"])
        .code(64);
    h.run(&[
        "offer-codes", "one-time", "generate", "--id", "o1", "--count", "10",
        "--expiration-date", "2001-01-01",
    ])
    .code(64);
    assert!(h.requests().is_empty());
}

#[test]
fn test_ids_cannot_redirect_destructive_commands() {
    let h = TestHarness::new();
    h.run(&["testflight", "beta-groups", "delete", "--id", "../apps/999", "--confirm"])
        .code(64);
    h.run(&["builds", "get", "--id", "b1?filter[app]=1"]).code(64);
    h.run(&["builds", "links", "--id", "b1/../..", "--type", "app"])
        .code(64);
    assert!(h.requests().is_empty());
}

#[test]
fn test_missing_credentials_exit_usage() {
    let config_dir = TempDir::new().unwrap();
    asc_cmd(&config_dir)
        .args(["apps", "list"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("ASC_KEY_ID"));
}

#[test]
fn test_auth_status_never_prints_key_material() {
    let config_dir = TempDir::new().unwrap();
    let pem = std::fs::read_to_string(fixtures_path().join("AuthKey_TEST.p8")).unwrap();
    let output = asc_cmd(&config_dir)
        .env("ASC_KEY_ID", "TESTKEY123")
        .env("ASC_ISSUER_ID", "issuer-uuid")
        .env("ASC_PRIVATE_KEY", &pem)
        .args(["auth", "status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(!stdout.contains("PRIVATE KEY"));

    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["key_id"], "TESTKEY123");
    assert_eq!(status["private_key"]["source"], "environment");
    assert_eq!(status["complete"], true);
}

#[test]
fn test_version_and_completions() {
    let config_dir = TempDir::new().unwrap();
    asc_cmd(&config_dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    asc_cmd(&config_dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("asc"));
}

#[test]
fn test_help_exits_successfully() {
    let config_dir = TempDir::new().unwrap();
    asc_cmd(&config_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("AUTHENTICATION"));
}
