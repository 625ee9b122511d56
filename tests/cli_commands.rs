//! End-to-end add/list/remove through the binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn hosts(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hosts").unwrap();
    cmd.env("HOSTS_CONFIG", file.with_extension("no-config.toml"))
        .env_remove("HOSTS_FILE")
        .arg("--file")
        .arg(file);
    cmd
}

#[test]
fn add_list_remove_flow() {
    let dir = common::temp_hosts_dir();
    let path = common::write_hosts(&dir, "# managed\n192.168.0.1\tb.test\n");

    hosts(&path)
        .args(["add", "x.test", "10.0.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added host: x.test 10.0.0.1"));

    hosts(&path)
        .args(["append", "y.test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1"));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# managed\n192.168.0.1\tb.test\n10.0.0.1\tx.test\n127.0.0.1\ty.test\n"
    );

    hosts(&path)
        .arg("list")
        .assert()
        .success()
        .stdout("Host: b.test, IP: 192.168.0.1\nHost: x.test, IP: 10.0.0.1\nHost: y.test, IP: 127.0.0.1\n");

    hosts(&path)
        .args(["list", "--comments"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# managed\nHost: b.test"));

    hosts(&path)
        .args(["remove", "x.test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed host: x.test (1 entries)"));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# managed\n192.168.0.1\tb.test\n127.0.0.1\ty.test\n"
    );
}

#[test]
fn list_shows_aliases_as_hosts() {
    let dir = common::temp_hosts_dir();
    let path = common::write_hosts(&dir, "127.0.0.1 a.test b.test\n");

    hosts(&path)
        .arg("l")
        .assert()
        .success()
        .stdout("Host: a.test, IP: 127.0.0.1\nHost: b.test, IP: 127.0.0.1\n");
}

#[test]
fn hosts_file_env_is_used_without_flag() {
    let dir = common::temp_hosts_dir();
    let path = common::write_hosts(&dir, "10.1.1.1\tenv.test\n");

    Command::cargo_bin("hosts")
        .unwrap()
        .env("HOSTS_CONFIG", dir.path().join("no-config.toml"))
        .env("HOSTS_FILE", &path)
        .arg("list")
        .assert()
        .success()
        .stdout("Host: env.test, IP: 10.1.1.1\n");
}

#[test]
fn default_address_comes_from_config() {
    let dir = common::temp_hosts_dir();
    let path = common::write_hosts(&dir, "");
    let config = dir.path().join("config.toml");
    fs::write(&config, "default_address = \"10.9.9.9\"\n").unwrap();

    Command::cargo_bin("hosts")
        .unwrap()
        .env("HOSTS_CONFIG", &config)
        .env_remove("HOSTS_FILE")
        .args(["--file"])
        .arg(&path)
        .args(["add", "cfg.test"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&path).unwrap(), "10.9.9.9\tcfg.test\n");
}

#[test]
fn invalid_ip_is_usage_error() {
    let dir = common::temp_hosts_dir();
    let path = common::write_hosts(&dir, "127.0.0.1\ta.test\n");

    hosts(&path)
        .args(["add", "x.test", "not-an-ip"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid IP address"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "127.0.0.1\ta.test\n");
}

#[test]
fn missing_file_is_runtime_error() {
    let dir = common::temp_hosts_dir();
    let path = dir.path().join("missing");

    hosts(&path)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("list hosts in"));
}

#[test]
fn remove_requires_host() {
    let dir = common::temp_hosts_dir();
    let path = common::write_hosts(&dir, "");

    hosts(&path).arg("remove").assert().code(2);
}
