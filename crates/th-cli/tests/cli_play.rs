//! End-to-end CLI tests for the `play` command.
#![allow(deprecated)] // Command::cargo_bin: macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn threshold() -> Command {
    let mut cmd = Command::cargo_bin("threshold").unwrap();
    cmd.arg("--no-color");
    cmd
}

/// Write a two-room world with a locked door to a temp directory.
fn cellar_world() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cellar.json"),
        r#"{
    "name": "Cellar",
    "rooms": [
        { "name": "Landing", "description": "Damp steps lead down." },
        { "name": "Cellar", "description": "Barrels, mostly empty." }
    ],
    "doors": [
        {
            "between": ["Landing", "Cellar"],
            "name": "cellar door",
            "locked": true,
            "key": { "name": "rusty key", "placement": "player" }
        }
    ],
    "player": { "name": "Guest", "location": "Landing" }
}"#,
    )
    .unwrap();
    dir
}

// -- Demo world --

#[test]
fn exit_says_goodbye() {
    threshold()
        .write_stdin("Exit game\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Shore =="))
        .stdout(predicate::str::contains("1. Open cottage door"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn end_of_input_exits_cleanly() {
    threshold()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!").not());
}

#[test]
fn fetch_the_key_and_climb_the_tower() {
    let script = "Open tower door\n\
                  Open cottage door\n\
                  Take iron key\n\
                  Back\n\
                  Open tower door\n\
                  Open trapdoor\n\
                  Take oil can\n\
                  Exit game\n";
    threshold()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("The tower door is locked."))
        .stdout(predicate::str::contains("You take the iron key."))
        .stdout(predicate::str::contains("You return to Shore."))
        .stdout(predicate::str::contains(
            "You unlock the tower door with the iron key.",
        ))
        .stdout(predicate::str::contains("You enter Lamp Room."))
        .stdout(predicate::str::contains("You take the oil can."));
}

#[test]
fn talk_to_the_keeper() {
    let script = "Open cottage door\n\
                  Talk to Keeper\n\
                  I have a letter for you\n\
                  Goodbye\n\
                  Exit game\n";
    threshold()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("You approach Keeper."))
        .stdout(predicate::str::contains(
            "Keeper: \"From my daughter? I'll read it later.\"",
        ))
        .stdout(predicate::str::contains(
            "Keeper: \"Shut the door behind you.\"",
        ));
}

#[test]
fn typos_get_a_suggestion() {
    threshold()
        .write_stdin("Exit gaem\nExit game\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Did you mean \"Exit game\"?"));
}

#[test]
fn confirm_exit_asks_first() {
    threshold()
        .arg("--confirm-exit")
        .write_stdin("Exit game\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Really leave the game? [y/N]"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn max_depth_is_enforced() {
    let assert = threshold()
        .args(["--max-depth", "1"])
        .write_stdin("Open cottage door\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "error: contexts nested deeper than the limit of 1",
        ));
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert_eq!(stderr.matches("nested deeper").count(), 1);
}

// -- World files --

#[test]
fn plays_a_world_file() {
    let dir = cellar_world();
    threshold()
        .arg("--world")
        .arg(dir.path().join("cellar.json"))
        .write_stdin("Open cellar door\nExit game\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Landing =="))
        .stdout(predicate::str::contains(
            "You unlock the cellar door with the rusty key.",
        ))
        .stdout(predicate::str::contains("Barrels, mostly empty."));
}

#[test]
fn missing_world_file_fails() {
    let dir = TempDir::new().unwrap();
    threshold()
        .arg("--world")
        .arg(dir.path().join("nowhere.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: cannot read"));
}

#[test]
fn invalid_world_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{ "name": "w", "rooms": [], "player": { "name": "P", "location": "Void" } }"#,
    )
    .unwrap();
    threshold()
        .arg("--world")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown room"));
}
