//! `nrp config-hash` and `nrp decoders`
//!
//! Validates: config layering is visible from the binary and the decoder
//! registry follows the configured builds.
//!
//! GREEN when:
//! - config-hash prints a 64-hex hash line followed by canonical JSON.
//! - decoders lists the default build with no config.
//! - decoders lists configured builds ascending.
//! - A repeated build in config is rejected.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[allow(deprecated)]
fn nrp() -> Command {
    Command::cargo_bin("nrp").unwrap()
}

#[test]
fn config_hash_prints_hash_and_canonical_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let base = dir.path().join("base.yaml");
    let overlay = dir.path().join("overlay.yaml");
    fs::write(&base, "heroes:\n  attribute_id: 4002\nduration:\n  tick_offset: 610\n")?;
    fs::write(&overlay, "duration:\n  tick_offset: 600\n")?;

    let output = nrp().arg("config-hash").arg(&base).arg(&overlay).output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();
    let hash_line = lines.next().unwrap_or_default();
    let hash = hash_line.strip_prefix("config_hash=").unwrap_or_default();
    assert_eq!(hash.len(), 64, "{hash_line}");
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

    let canonical = lines.next().unwrap_or_default();
    assert_eq!(
        canonical,
        r#"{"duration":{"tick_offset":600},"heroes":{"attribute_id":4002}}"#
    );
    Ok(())
}

#[test]
fn decoders_default_to_one_build() {
    nrp()
        .arg("decoders")
        .assert()
        .success()
        .stdout("96370\n");
}

#[test]
fn decoders_follow_config() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let cfg = dir.path().join("decoders.yaml");
    fs::write(&cfg, "decoders:\n  builds: [96370, 70000, 88000]\n")?;

    nrp()
        .arg("decoders")
        .arg("--config")
        .arg(&cfg)
        .assert()
        .success()
        .stdout("70000\n88000\n96370\n");
    Ok(())
}

#[test]
fn repeated_build_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let cfg = dir.path().join("dup.yaml");
    fs::write(&cfg, "decoders:\n  builds: [96370, 96370]\n")?;

    nrp()
        .arg("decoders")
        .arg("--config")
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(predicate::str::contains("96370"));
    Ok(())
}
