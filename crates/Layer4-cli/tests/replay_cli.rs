//! combiner 바이너리 end-to-end 테스트

use std::path::Path;
use std::process::{Command, Output};

fn combiner(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_combiner"))
        .args(args)
        .arg("--config")
        .arg(config_dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run combiner")
}

#[test]
fn test_replay_prints_state_per_step() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("script.json");
    std::fs::write(
        &script,
        r#"{
            "reducers": {"counter": {"kind": "counter", "on": "increment"}},
            "steps": [
                {"op": "dispatch", "action": {"type": "increment"}},
                {"op": "add", "key": "stack", "reducer": {"kind": "stack", "on": "push"}}
            ]
        }"#,
    )
    .unwrap();

    let output = combiner(&["replay", script.to_str().unwrap()], dir.path());
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "[1] dispatch increment",
            r#"{"counter":1}"#,
            "[2] add stack",
            r#"{"counter":1,"stack":[]}"#,
        ]
    );
}

#[test]
fn test_replay_reads_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("combiner.json"),
        r#"{"store": {"name": "cli", "preloadedState": {"counter": 9}}}"#,
    )
    .unwrap();
    let script = dir.path().join("script.json");
    std::fs::write(
        &script,
        r#"{
            "reducers": {"counter": {"kind": "counter", "on": "increment"}},
            "steps": [{"op": "dispatch", "action": {"type": "increment"}}]
        }"#,
    )
    .unwrap();

    let output = combiner(&["replay", script.to_str().unwrap()], dir.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(r#"{"counter":10}"#));
}

#[test]
fn test_replay_fails_on_duplicate_key_after_printing_earlier_steps() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("script.json");
    std::fs::write(
        &script,
        r#"{
            "reducers": {"counter": {"kind": "counter", "on": "increment"}},
            "steps": [
                {"op": "dispatch", "action": {"type": "increment"}},
                {"op": "add", "key": "counter", "reducer": {"kind": "passthrough"}},
                {"op": "dispatch", "action": {"type": "increment"}}
            ]
        }"#,
    )
    .unwrap();

    let output = combiner(&["replay", script.to_str().unwrap()], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error: Already existing reducer: counter"));

    // 실패 전 단계는 이미 출력됨
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["[1] dispatch increment", r#"{"counter":1}"#]
    );
}
