use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a test command
fn dwhctl() -> Command {
    Command::cargo_bin("dwhctl").unwrap()
}

/// A config file that parses but points nowhere
const VALID_CONFIG: &str = r#"
[aws]
access_key_id = "AKIATEST"
secret_access_key = "shhh"

[cluster]
identifier = "dwh-cluster"
iam_role_name = "dwhRole"
database = "dwh"
master_username = "dwhuser"
"#;

fn write_config(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dwh.toml");
    std::fs::write(&path, content).unwrap();
    let path = path.display().to_string();
    (dir, path)
}

#[test]
fn test_help_flag() {
    dwhctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Redshift data warehouse"))
        .stdout(predicate::str::contains("COMMANDS:"));
}

#[test]
fn test_version_flag() {
    dwhctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dwhctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_command_flag_is_a_parse_error() {
    dwhctl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--command"));
}

#[test]
fn test_help_command_prints_usage_and_exits_zero() {
    dwhctl()
        .args(["--command", "help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("check_credentials"))
        .stdout(predicate::str::contains("create_redshift"));
}

#[test]
fn test_unrecognized_command_prints_usage_and_exits_zero() {
    dwhctl()
        .args(["--command", "drop_tables"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not recognized"))
        .stdout(predicate::str::contains("delete_redshift"));
}

#[test]
fn test_missing_config_file_exits_one() {
    dwhctl()
        .args(["--command", "check_redshift"])
        .args(["--config-file", "/nonexistent/dwh.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn test_no_config_anywhere_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    dwhctl()
        .args(["--command", "check_redshift"])
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("DWHCTL_CONFIG_FILE")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no config file found"));
}

#[test]
fn test_missing_required_key_exits_one() {
    // [cluster] lacks master_username
    let (_dir, path) = write_config(
        r#"
[aws]
access_key_id = "AKIATEST"
secret_access_key = "shhh"

[cluster]
identifier = "dwh-cluster"
iam_role_name = "dwhRole"
database = "dwh"
"#,
    );

    dwhctl()
        .args(["--command", "check_redshift"])
        .args(["--config-file", &path])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("master_username"));
}

#[test]
fn test_check_redshift_without_connection_string_exits_one() {
    let (_dir, path) = write_config(VALID_CONFIG);

    dwhctl()
        .args(["--command", "check_redshift"])
        .args(["--config-file", &path])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("probe.connection_string"));
}

#[test]
fn test_check_redshift_with_unreachable_endpoint_exits_one() {
    let (_dir, path) = write_config(&format!(
        "{VALID_CONFIG}\n[probe]\nconnection_string = \"postgresql://u:p@127.0.0.1:1/db\"\n"
    ));

    dwhctl()
        .args(["--command", "check_redshift"])
        .args(["--config-file", &path])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("connection probe failed"));
}
