use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/input/experiment.json")
}

#[test]
fn inspect_prints_nodes_and_edges() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = fixture_path();
    assert!(fixture.exists(), "fixture experiment document should exist");

    let mut cmd = Command::cargo_bin("relayout")?;
    cmd.arg("inspect").arg("--input").arg(&fixture);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("nodes: 3"))
        .stdout(predicate::str::contains("dataset-1 -> A"))
        .stdout(predicate::str::contains("A -> B"));

    Ok(())
}

#[test]
fn inspect_reads_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(fixture_path())?;

    let mut cmd = Command::cargo_bin("relayout")?;
    cmd.arg("inspect").arg("--input").arg("-").write_stdin(raw);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("edges: 2"));

    Ok(())
}

#[test]
fn inspect_rejects_a_malformed_document() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let bad = tmp.path().join("broken.json");
    fs::write(&bad, "{ \"Graph\": ")?;

    let mut cmd = Command::cargo_bin("relayout")?;
    cmd.arg("inspect").arg("--input").arg(&bad);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("parse"));

    Ok(())
}
