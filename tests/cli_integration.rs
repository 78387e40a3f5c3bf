//! Integration tests for the fieldcrypt CLI.
//!
//! These run the binary end-to-end using `assert_cmd`, with the master key
//! passed through the environment and an empty temp dir as config dir so no
//! stray `.fieldcrypt.toml` is picked up.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KEY_VAR: &str = "FIELD_ENCRYPTION_KEY";
const TEST_KEY: &str = "5f0c1e9a7b3d24c68e1f0a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f";

/// Helper: a Command pointing at the fieldcrypt binary with a test key.
fn fieldcrypt(config_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("fieldcrypt").expect("binary should exist");
    cmd.env(KEY_VAR, TEST_KEY)
        .env_remove("FIELDCRYPT_LOG")
        .arg("--config-dir")
        .arg(config_dir.path());
    cmd
}

/// Run a command and return its trimmed stdout.
fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap().trim_end().to_string()
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    fieldcrypt(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Field-level encryption"))
        .stdout(predicate::str::contains("hash"))
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("keygen"));
}

#[test]
fn no_args_shows_help() {
    #[allow(deprecated)]
    Command::cargo_bin("fieldcrypt")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn keygen_prints_hex_key() {
    let tmp = TempDir::new().unwrap();
    let key = stdout_of(fieldcrypt(&tmp).arg("keygen"));
    assert_eq!(key.len(), 64);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn randomized_round_trip_through_binary() {
    let tmp = TempDir::new().unwrap();
    let payload = stdout_of(fieldcrypt(&tmp).args(["encrypt", "+15550100"]));
    assert_eq!(payload.split(':').count(), 3);

    let plaintext = stdout_of(fieldcrypt(&tmp).args(["decrypt", &payload]));
    assert_eq!(plaintext, "+15550100");
}

#[test]
fn deterministic_output_is_stable() {
    let tmp = TempDir::new().unwrap();
    let first = stdout_of(fieldcrypt(&tmp).args(["encrypt", "--deterministic", "api-key"]));
    let second = stdout_of(fieldcrypt(&tmp).args(["encrypt", "-d", "api-key"]));
    assert_eq!(first, second);

    let plaintext = stdout_of(fieldcrypt(&tmp).args(["decrypt", "-d", &first]));
    assert_eq!(plaintext, "api-key");

    fieldcrypt(&tmp)
        .args(["matches", &first, "api-key"])
        .assert()
        .success();
    fieldcrypt(&tmp)
        .args(["matches", &first, "other-key"])
        .assert()
        .failure();
}

#[test]
fn piped_value_is_encrypted() {
    let tmp = TempDir::new().unwrap();
    let payload = stdout_of(fieldcrypt(&tmp).arg("encrypt").write_stdin("from-stdin\n"));
    let plaintext = stdout_of(fieldcrypt(&tmp).args(["decrypt", &payload]));
    assert_eq!(plaintext, "from-stdin");
}

#[test]
fn hash_then_verify() {
    let tmp = TempDir::new().unwrap();
    let hash = stdout_of(fieldcrypt(&tmp).args(["hash", "p1"]));
    assert!(hash.starts_with("$argon2id$"));

    fieldcrypt(&tmp)
        .args(["verify", &hash, "p1"])
        .assert()
        .success();
    fieldcrypt(&tmp)
        .args(["verify", &hash, "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match"));
}

#[test]
fn missing_key_fails_fast() {
    let tmp = TempDir::new().unwrap();
    fieldcrypt(&tmp)
        .env_remove(KEY_VAR)
        .args(["encrypt", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not set"));
}

#[test]
fn short_key_fails_fast() {
    let tmp = TempDir::new().unwrap();
    fieldcrypt(&tmp)
        .env(KEY_VAR, "short")
        .args(["encrypt", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 32 bytes"));
}

#[test]
fn config_file_selects_key_variable() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(".fieldcrypt.toml"),
        "key_env = \"APP_FIELD_KEY\"\nkey_encoding = \"hex\"\n",
    )
    .unwrap();

    let payload = stdout_of(
        fieldcrypt(&tmp)
            .env_remove(KEY_VAR)
            .env("APP_FIELD_KEY", TEST_KEY)
            .args(["encrypt", "configured"]),
    );
    let plaintext = stdout_of(
        fieldcrypt(&tmp)
            .env_remove(KEY_VAR)
            .env("APP_FIELD_KEY", TEST_KEY)
            .args(["decrypt", &payload]),
    );
    assert_eq!(plaintext, "configured");
}

#[test]
fn malformed_payload_reports_format_error() {
    let tmp = TempDir::new().unwrap();
    fieldcrypt(&tmp)
        .args(["decrypt", "not-a-valid-payload"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid ciphertext format"));
}

#[test]
fn inspect_needs_no_key() {
    let tmp = TempDir::new().unwrap();
    let payload = stdout_of(fieldcrypt(&tmp).args(["encrypt", "abc"]));

    fieldcrypt(&tmp)
        .env_remove(KEY_VAR)
        .args(["inspect", &payload])
        .assert()
        .success()
        .stdout(predicate::str::contains("AES-256-GCM"))
        .stdout(predicate::str::contains("3 bytes"));
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    fieldcrypt(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldcrypt"));
}

#[test]
fn completions_reject_unknown_shell() {
    let tmp = TempDir::new().unwrap();
    fieldcrypt(&tmp)
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn hashing_needs_no_master_key() {
    let tmp = TempDir::new().unwrap();
    let hash = stdout_of(
        fieldcrypt(&tmp)
            .env_remove(KEY_VAR)
            .args(["hash", "p1"]),
    );
    assert!(hash.starts_with("$argon2id$"));

    fieldcrypt(&tmp)
        .env_remove(KEY_VAR)
        .args(["verify", &hash, "p1"])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn non_utf8_key_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = TempDir::new().unwrap();
    fieldcrypt(&tmp)
        .env(KEY_VAR, OsStr::from_bytes(&[0xff, 0xfe, 0x41]))
        .args(["encrypt", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}
