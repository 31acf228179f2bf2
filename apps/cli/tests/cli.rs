use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PROFILE: &str = r#"
name = "users"

[[attributes]]
identifier = "name"
label = "Full Name"

[[attributes]]
identifier = "location"

[importers.basic]
attributes = ["name"]

[importers.address]
attributes = ["location"]
"#;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("users.toml"), PROFILE).unwrap();
    dir
}

fn rowmap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rowmap").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn header_prints_labels() {
    let dir = workspace();
    rowmap(&dir)
        .args(["header", "--profile", "users.toml"])
        .assert()
        .success()
        .stdout("Full Name,location\n");

    rowmap(&dir)
        .args(["header", "-p", "users.toml", "--identifiers"])
        .assert()
        .success()
        .stdout("name,location\n");
}

#[test]
fn export_reads_json_lines_from_stdin() {
    let dir = workspace();
    rowmap(&dir)
        .args(["export", "-p", "users.toml", "--labels"])
        .write_stdin("{\"name\":\"Rick\",\"location\":\"Earth C-137\"}\n")
        .assert()
        .success()
        .stdout("Full Name,location\nRick,Earth C-137\n");
}

#[test]
fn export_jsonl_keys_by_label() {
    let dir = workspace();
    fs::write(dir.path().join("users.jsonl"), "{\"location\":\"Earth C-137\",\"name\":\"Rick\"}\n").unwrap();

    rowmap(&dir)
        .args(["export", "-p", "users.toml", "-i", "users.jsonl", "--format", "jsonl"])
        .assert()
        .success()
        .stdout("{\"Full Name\":\"Rick\",\"location\":\"Earth C-137\"}\n");
}

#[test]
fn import_combines_named_importers() {
    let dir = workspace();
    rowmap(&dir)
        .args(["import", "-p", "users.toml", "--skip-header", "-u", "basic", "-u", "address"])
        .write_stdin("Full Name,location\nRick,Earth C-137\n")
        .assert()
        .success()
        .stdout("{\"name\":\"Rick\",\"location\":\"Earth C-137\"}\n");
}

#[test]
fn import_basic_leaves_location_out() {
    let dir = workspace();
    rowmap(&dir)
        .args(["import", "-p", "users.toml", "--using", "basic"])
        .write_stdin("Rick\n")
        .assert()
        .success()
        .stdout("{\"name\":\"Rick\"}\n");
}

#[test]
fn short_row_fails_with_message() {
    let dir = workspace();
    rowmap(&dir)
        .args(["import", "-p", "users.toml"])
        .write_stdin("Rick\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row shape error"));
}

#[test]
fn unknown_importer_fails() {
    let dir = workspace();
    rowmap(&dir)
        .args(["import", "-p", "users.toml", "-u", "billing"])
        .write_stdin("Rick\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("billing"));
}

#[test]
fn missing_profile_fails() {
    let dir = workspace();
    rowmap(&dir)
        .args(["header", "-p", "absent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn verbose_logs_go_to_stderr_only() {
    let dir = workspace();
    rowmap(&dir)
        .args(["-vv", "header", "-p", "users.toml"])
        .assert()
        .success()
        .stdout("Full Name,location\n")
        .stderr(predicate::str::contains("Profile loaded"));
}
