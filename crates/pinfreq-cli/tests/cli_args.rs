use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_duration_and_flags() {
    cargo_bin_cmd!("pinfreq")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DURATION_MS"))
        .stdout(predicate::str::contains("--chip"))
        .stdout(predicate::str::contains("--lines"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("pinfreq")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_zero_duration_rejected() {
    cargo_bin_cmd!("pinfreq")
        .arg("0")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid duration: 0"));
}

#[test]
fn test_negative_duration_rejected() {
    cargo_bin_cmd!("pinfreq")
        .arg("-5")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid duration: -5"));
}

#[test]
fn test_non_numeric_duration_rejected() {
    cargo_bin_cmd!("pinfreq")
        .arg("soon")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid duration: soon"));
}

#[test]
fn test_invalid_duration_checked_before_hardware() {
    // The chip path does not exist; the duration error must still win,
    // proving no acquisition is attempted for a bad configuration.
    cargo_bin_cmd!("pinfreq")
        .args(["--chip", "/nonexistent/gpiochip99", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid duration"))
        .stderr(predicate::str::contains("gpiochip99").not());
}

#[test]
fn test_zero_lines_rejected() {
    cargo_bin_cmd!("pinfreq")
        .args(["--lines", "0", "100"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid line count"));
}

#[test]
fn test_missing_chip_is_an_acquisition_error() {
    cargo_bin_cmd!("pinfreq")
        .args(["--chip", "/nonexistent/gpiochip99", "100"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/gpiochip99"));
}
