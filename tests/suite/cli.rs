//! End-to-end runs of the `navspy` binary.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

use crate::common::write_file;

const SESSION: &str = r#"{
    "viewport_height": 800,
    "header_nodes": [1],
    "pages": {
        "/": [
            {"id": "home", "top": 0, "height": 1000},
            {"id": "about", "top": 1000, "height": 1000}
        ]
    },
    "steps": [
        {"action": "scroll", "to": 500},
        {"action": "toggle_menu"},
        {"action": "pointer_down", "node": 99},
        {"action": "select_section", "section": "home"}
    ]
}"#;

/// Run the binary with the default config location pointed at `dir`.
fn navspy(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_navspy"))
        .args(args)
        .env("NAVSPY_CONFIG", dir.join("absent.toml"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn replay_prints_state_per_step() {
    let dir = tempdir().unwrap();
    let trace = write_file(dir.path(), "session.json", SESSION);

    let output = navspy(dir.path(), &["replay", trace.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("[0] mount\n"));
    assert!(text.contains("[1] scroll 500\n"));
    assert!(text.contains("    + active_section about\n"));
    assert!(text.contains("[3] pointer_down 99\n"));
    assert!(text.contains("[4] select_section home -> scrolled\n"));
}

#[test]
fn replay_json_is_machine_readable() {
    let dir = tempdir().unwrap();
    let trace = write_file(dir.path(), "session.json", SESSION);

    let output = navspy(dir.path(), &["replay", "--json", trace.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 5);

    assert_eq!(
        reports[1]["changes"][0],
        serde_json::json!({"kind": "active_section", "section": {"section": "about"}})
    );
    assert_eq!(reports[2]["state"]["menu"], "open");
    assert_eq!(reports[3]["state"]["menu"], "closed");
    assert_eq!(reports[4]["outcome"], "scrolled");
    assert_eq!(
        reports[4]["state"]["active"],
        serde_json::json!({"section": "home"})
    );
}

#[test]
fn config_flag_tunes_resolver() {
    let dir = tempdir().unwrap();
    let trace = write_file(dir.path(), "session.json", SESSION);
    let config = write_file(
        dir.path(),
        "navspy.toml",
        "[resolver]\ntop_threshold_px = 600\n",
    );

    let output = navspy(
        dir.path(),
        &[
            "replay",
            trace.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    // 500 px is still "at the top", and home is in view.
    assert!(stdout(&output).contains("location=/ active=home menu=closed scroll=500"));
}

#[test]
fn env_config_is_picked_up() {
    let dir = tempdir().unwrap();
    let config = write_file(
        dir.path(),
        "env.toml",
        "[[links]]\nlabel = \"Blog\"\nroute = \"/blog\"\n",
    );

    let output = Command::new(env!("CARGO_BIN_EXE_navspy"))
        .args(["links", "--at", "/blog"])
        .env("NAVSPY_CONFIG", &config)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "Blog  /blog  (active)\n");
}

#[test]
fn links_highlight_current_route() {
    let dir = tempdir().unwrap();
    let output = navspy(dir.path(), &["links", "--at", "/hero"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Our Clinic     /hero  (active)\n"));
    assert!(text.contains("Home           /\n"));
}

#[test]
fn links_reject_undeclared_active_section() {
    let dir = tempdir().unwrap();
    let output = navspy(dir.path(), &["links", "--active", "pricing"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("section `pricing` is not declared"));
}

#[test]
fn invalid_config_fails_with_reason() {
    let dir = tempdir().unwrap();
    let config = write_file(
        dir.path(),
        "bad.toml",
        "[[links]]\nlabel = \"Pricing\"\nsection = \"pricing\"\n",
    );

    let output = navspy(dir.path(), &["links", "--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("invalid navspy configuration"));
    assert!(err.contains("undeclared section `pricing`"));
}

#[test]
fn missing_trace_fails_with_path() {
    let dir = tempdir().unwrap();
    let output = navspy(dir.path(), &["replay", "nowhere.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read trace nowhere.json"));
}
