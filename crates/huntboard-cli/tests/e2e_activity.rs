//! E2E tests for follow-ups, outreach, warm-up actions, tags and
//! preferences.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

fn hb_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hb"));
    cmd.arg("--data-dir").arg(dir);
    cmd.env("HUNTBOARD_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd.env_remove("HUNTBOARD_DIR");
    cmd
}

fn json_of(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("hb should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

fn add_card(dir: &Path, company: &str) -> String {
    let json = json_of(hb_cmd(dir).args(["add", company, "--json"]));
    json["id"].as_str().expect("id field").to_string()
}

fn show(dir: &Path, id: &str) -> Value {
    json_of(hb_cmd(dir).args(["show", id, "--json"]))
}

// ---------------------------------------------------------------------------
// Follow-ups
// ---------------------------------------------------------------------------

#[test]
fn follow_ups_drive_next_follow_up_date() {
    let dir = TempDir::new().unwrap();
    let id = add_card(dir.path(), "Acme");

    let later = json_of(hb_cmd(dir.path()).args([
        "follow-up",
        "add",
        &id,
        "Send portfolio",
        "--on",
        "2030-06-10",
        "--json",
    ]));
    let sooner = json_of(hb_cmd(dir.path()).args([
        "follow-up",
        "add",
        &id,
        "Ping recruiter",
        "--on",
        "2030-06-01",
        "--json",
    ]));
    assert_eq!(sooner["next_follow_up_date"], "2030-06-01T00:00:00Z");

    let sooner_id = sooner["id"].as_str().unwrap();
    hb_cmd(dir.path())
        .args(["follow-up", "done", &id, &sooner_id[..8], "--notes", "Replied"])
        .assert()
        .success();

    let card = show(dir.path(), &id);
    assert_eq!(card["nextFollowUpDate"], "2030-06-10T00:00:00Z");
    let follow_ups = card["followUps"].as_array().unwrap();
    assert_eq!(follow_ups.len(), 2);
    let done = follow_ups
        .iter()
        .find(|f| f["id"] == sooner["id"])
        .unwrap();
    assert_eq!(done["completed"], true);
    assert_eq!(done["notes"], "Replied");
    assert_eq!(later["target_id"], id.as_str());
}

#[test]
fn has_follow_up_filter_needs_open_follow_up() {
    let dir = TempDir::new().unwrap();
    let with = add_card(dir.path(), "Acme");
    add_card(dir.path(), "Globex");

    hb_cmd(dir.path())
        .args(["follow-up", "add", &with, "Check in", "--on", "+2d"])
        .assert()
        .success();

    let json = json_of(hb_cmd(dir.path()).args(["list", "--has-follow-up", "--json"]));
    assert_eq!(json["total"], 1);
    assert_eq!(json["targets"][0]["id"], with.as_str());
}

#[test]
fn completing_unknown_follow_up_fails() {
    let dir = TempDir::new().unwrap();
    let id = add_card(dir.path(), "Acme");
    hb_cmd(dir.path())
        .args(["follow-up", "done", &id, "deadbeef", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2004"));
}

#[test]
fn follow_up_action_must_not_be_empty() {
    let dir = TempDir::new().unwrap();
    let id = add_card(dir.path(), "Acme");
    hb_cmd(dir.path())
        .args(["follow-up", "add", &id, " "])
        .assert()
        .failure();
    assert_eq!(show(dir.path(), &id)["followUps"], serde_json::json!([]));
}

#[test]
fn follow_up_date_past_the_calendar_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let id = add_card(dir.path(), "Acme");
    hb_cmd(dir.path())
        .args(["follow-up", "add", &id, "Check in", "--on", "+1000000000w"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid date"));
    assert_eq!(show(dir.path(), &id)["followUps"], serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Outreach
// ---------------------------------------------------------------------------

#[test]
fn outreach_then_response() {
    let dir = TempDir::new().unwrap();
    let id = add_card(dir.path(), "Acme");

    let logged = json_of(hb_cmd(dir.path()).args([
        "outreach",
        "add",
        &id,
        "--type",
        "referral-request",
        "--contact",
        "Sam",
        "--referrer",
        "Alex",
        "--json",
    ]));
    assert_eq!(logged["kind"], "referral-request");
    let outreach_id = logged["id"].as_str().unwrap().to_string();

    let card = show(dir.path(), &id);
    let record = &card["outreachRecords"][0];
    assert_eq!(record["type"], "referral-request");
    assert_eq!(record["contactPerson"], "Sam");
    assert_eq!(record["hasReferral"], true);
    assert_eq!(record["referrerName"], "Alex");
    assert_eq!(record["responseReceived"], false);

    hb_cmd(dir.path())
        .args(["outreach", "respond", &id, &outreach_id, "--on", "2030-01-02"])
        .assert()
        .success();

    let card = show(dir.path(), &id);
    let record = &card["outreachRecords"][0];
    assert_eq!(record["responseReceived"], true);
    assert_eq!(record["responseDate"], "2030-01-02T00:00:00Z");
}

#[test]
fn responding_to_unknown_outreach_fails() {
    let dir = TempDir::new().unwrap();
    let id = add_card(dir.path(), "Acme");
    hb_cmd(dir.path())
        .args(["outreach", "respond", &id, "0000", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2005"));
}

// ---------------------------------------------------------------------------
// Warm-up
// ---------------------------------------------------------------------------

#[test]
fn warm_up_actions_accumulate_score() {
    let dir = TempDir::new().unwrap();
    let id = add_card(dir.path(), "Acme");

    let first = json_of(hb_cmd(dir.path()).args([
        "warm-up",
        "add",
        &id,
        "Followed engineering blog",
        "--type",
        "follow-linkedin",
        "--json",
    ]));
    assert_eq!(first["warm_up_score"], 10);

    let second = json_of(hb_cmd(dir.path()).args([
        "warm-up",
        "add",
        &id,
        "Commented on launch post",
        "--type",
        "comment",
        "--impact",
        "95",
        "--json",
    ]));
    assert_eq!(second["warm_up_score"], 100);

    let card = show(dir.path(), &id);
    assert_eq!(card["warmUpScore"], 100);
    assert_eq!(card["warmUpActions"].as_array().unwrap().len(), 2);
}

#[test]
fn warm_up_impact_is_bounded() {
    let dir = TempDir::new().unwrap();
    let id = add_card(dir.path(), "Acme");
    hb_cmd(dir.path())
        .args(["warm-up", "add", &id, "Too much", "--type", "comment", "--impact", "101"])
        .assert()
        .failure();
    assert_eq!(show(dir.path(), &id)["warmUpScore"], 0);
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[test]
fn tag_catalogue_lifecycle() {
    let dir = TempDir::new().unwrap();

    let tag = json_of(hb_cmd(dir.path()).args([
        "tags", "create", "remote", "--color", "#4CAF50", "--json",
    ]));
    assert_eq!(tag["label"], "remote");
    assert_eq!(tag["color"], "#4CAF50");

    hb_cmd(dir.path())
        .args(["tags", "create", "remote"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let json = json_of(hb_cmd(dir.path()).args(["add", "Acme", "--tag", "remote", "--json"]));
    let id = json["id"].as_str().unwrap().to_string();

    let rows = json_of(hb_cmd(dir.path()).args(["tags", "--json"]));
    assert_eq!(rows[0]["label"], "remote");
    assert_eq!(rows[0]["count"], 1);

    hb_cmd(dir.path())
        .args(["tags", "delete", "remote"])
        .assert()
        .success();
    assert_eq!(show(dir.path(), &id)["tags"], serde_json::json!([]));
    assert_eq!(
        json_of(hb_cmd(dir.path()).args(["tags", "list", "--json"])),
        serde_json::json!([])
    );
}

#[test]
fn tag_color_must_be_hex() {
    let dir = TempDir::new().unwrap();
    hb_cmd(dir.path())
        .args(["tags", "create", "remote", "--color", "green"])
        .assert()
        .failure();
}

#[test]
fn deleting_unknown_tag_fails() {
    let dir = TempDir::new().unwrap();
    hb_cmd(dir.path())
        .args(["tags", "delete", "ghost", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2003"));
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

#[test]
fn prefs_set_show_reset() {
    let dir = TempDir::new().unwrap();

    let defaults = json_of(hb_cmd(dir.path()).args(["prefs", "--json"]));
    assert_eq!(defaults["sortBy"], "updated");
    assert_eq!(defaults["sortDirection"], "desc");

    let updated = json_of(hb_cmd(dir.path()).args([
        "prefs",
        "set",
        "--search",
        "acme",
        "--sort",
        "company",
        "--direction",
        "asc",
        "--tag",
        "remote",
        "--json",
    ]));
    assert_eq!(updated["searchQuery"], "acme");
    assert_eq!(updated["sortBy"], "company");
    assert_eq!(updated["filters"]["tags"], serde_json::json!(["remote"]));

    let shown = json_of(hb_cmd(dir.path()).args(["prefs", "show", "--json"]));
    assert_eq!(shown, updated);

    hb_cmd(dir.path()).args(["prefs", "reset"]).assert().success();
    let reset = json_of(hb_cmd(dir.path()).args(["prefs", "--json"]));
    assert_eq!(reset, defaults);
}

#[test]
fn prefs_reject_overlong_search() {
    let dir = TempDir::new().unwrap();
    hb_cmd(dir.path())
        .args(["prefs", "set", "--search", &"q".repeat(201)])
        .assert()
        .failure();
}
