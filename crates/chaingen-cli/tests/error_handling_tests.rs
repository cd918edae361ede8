//! Exit codes and error messages of the `chaingen` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn chaingen(dir: &Path) -> Command {
    let config = dir.join("empty.toml");
    fs::write(&config, "").unwrap();
    let mut cmd = Command::cargo_bin("chaingen").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn test_bad_option_value_is_user_error() {
    let temp = TempDir::new().unwrap();
    chaingen(temp.path())
        .args(["generate", "-s", "os=Linux", "-o", "fPIC=perhaps"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid option 'fPIC'"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_malformed_setting_pair_is_user_error() {
    let temp = TempDir::new().unwrap();
    chaingen(temp.path())
        .args(["generate", "-s", "os"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn test_missing_profile_is_not_found() {
    let temp = TempDir::new().unwrap();
    chaingen(temp.path())
        .args(["generate", "--profile", "nope.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Profile not found"));
}

#[test]
fn test_missing_templates_write_nothing() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("empty")).unwrap();

    chaingen(temp.path())
        .args(["generate", "-s", "os=Linux", "--template-dir", "empty"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("linux.toolchain.cmake.tmpl"));

    assert!(!temp.path().join("conan_toolchain.cmake").exists());
    assert!(!temp.path().join("conan_project_include.cmake").exists());
}

#[test]
fn test_template_syntax_error_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("generic.toolchain.cmake.tmpl"), "{% if %}\n").unwrap();
    fs::write(templates.join("project_include.cmake.tmpl"), "# ok\n").unwrap();

    chaingen(temp.path())
        .args(["generate", "--template-dir", "templates"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("generic.toolchain.cmake.tmpl"));

    assert!(!temp.path().join("conan_project_include.cmake").exists());
}

#[test]
fn test_template_dir_that_is_not_a_directory() {
    let temp = TempDir::new().unwrap();
    chaingen(temp.path())
        .args(["templates", "--template-dir", "missing"])
        .assert()
        .code(4);
}

#[test]
fn test_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    chaingen(temp.path())
        .args(["config", "get", "no.such.key"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    Command::cargo_bin("chaingen")
        .unwrap()
        .current_dir(temp.path())
        .env("NO_COLOR", "1")
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    Command::cargo_bin("chaingen")
        .unwrap()
        .arg("scaffold")
        .assert()
        .code(2);
}
