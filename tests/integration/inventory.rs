//! The `yc-inventory` binary against fixture CLIs.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use serde_json::{json, Value};

const FIXTURE_INSTANCES: &str = r#"[
  {"id": "fhm-stopped", "name": "old-box", "status": "STOPPED",
   "labels": {"project": "devops-course"},
   "network_interfaces": [{"primary_v4_address": {"address": "10.0.0.3", "one_to_one_nat": {"address": "51.250.0.3"}}}]},
  {"id": "fhm-private", "name": "private-box", "status": "RUNNING",
   "labels": {"project": "devops-course"},
   "network_interfaces": [{"primary_v4_address": {"address": "10.0.0.4"}}]},
  {"id": "fhm-web", "name": "web-1", "status": "RUNNING",
   "labels": {"project": "devops-course"},
   "network_interfaces": [{"primary_v4_address": {"address": "10.0.0.5", "one_to_one_nat": {"address": "51.250.0.5"}}}]}
]"#;

/// Fixture CLI scripts, written once before any test spawns a process.
struct Fixtures {
    listing: PathBuf,
    failing: PathBuf,
}

fn fixtures() -> &'static Fixtures {
    static FIXTURES: OnceLock<Fixtures> = OnceLock::new();
    FIXTURES.get_or_init(|| {
        let dir = std::env::temp_dir().join(format!("yc-inventory-fixtures-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let write_script = |name: &str, body: &str| {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        };

        Fixtures {
            listing: write_script("yc-listing", &format!("cat <<'JSON'\n{}\nJSON", FIXTURE_INSTANCES)),
            failing: write_script("yc-failing", "echo 'ERROR: folder not found' >&2\nexit 2"),
        }
    })
}

fn inventory(yc_bin: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yc-inventory"))
        .args(args)
        .env("YC_BIN", yc_bin)
        .env("YC_FOLDER_ID", "b1g-test-folder")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn missing_cli_exits_with_diagnostic() {
    fixtures();
    let output = inventory("devops-info-no-such-yc", &["--list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CLI not found"), "stderr was: {}", stderr);
}

#[test]
fn failing_cli_exits_with_its_stderr() {
    let output = inventory(fixtures().failing.to_str().unwrap(), &["--list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: folder not found"), "stderr was: {}", stderr);
}

#[test]
fn list_groups_the_eligible_instance() {
    let output = inventory(fixtures().listing.to_str().unwrap(), &["--list"]);
    assert!(output.status.success());

    let document: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["webservers"]["hosts"], json!(["web-1"]));
    assert_eq!(document["ungrouped"]["hosts"], json!([]));
    assert_eq!(document["all"]["children"], json!(["ungrouped", "webservers"]));

    let hostvars = document["_meta"]["hostvars"].as_object().unwrap();
    assert_eq!(hostvars.len(), 1);
    assert_eq!(hostvars["web-1"]["ansible_host"], "51.250.0.5");
    assert_eq!(hostvars["web-1"]["ansible_user"], "ubuntu");
}

#[test]
fn host_and_bare_invocations_need_no_cli() {
    fixtures();

    let host = inventory("devops-info-no-such-yc", &["--host", "web-1"]);
    assert!(host.status.success());
    assert_eq!(serde_json::from_slice::<Value>(&host.stdout).unwrap(), json!({}));

    let bare = inventory("devops-info-no-such-yc", &[]);
    assert!(bare.status.success());
    assert_eq!(
        serde_json::from_slice::<Value>(&bare.stdout).unwrap(),
        json!({"_meta": {"hostvars": {}}})
    );
}

#[test]
fn unrecognised_arguments_print_the_empty_inventory() {
    fixtures();

    for args in [&["--bogus"][..], &["--list", "extra"][..], &["list"][..]] {
        let output = inventory("devops-info-no-such-yc", args);
        assert!(output.status.success(), "args {:?} exited with {:?}", args, output.status);
        assert_eq!(
            serde_json::from_slice::<Value>(&output.stdout).unwrap(),
            json!({"_meta": {"hostvars": {}}})
        );
    }

    let bare_host = inventory("devops-info-no-such-yc", &["--host"]);
    assert!(bare_host.status.success());
    assert_eq!(serde_json::from_slice::<Value>(&bare_host.stdout).unwrap(), json!({}));
}
