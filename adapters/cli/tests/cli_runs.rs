use std::{
    io::Write,
    process::{Command, Stdio},
};

const LEVEL_ONE_CLEAR: &str = "\
# first battery
up up up left left left left down down down
# second battery
up up up right right right right right right right right down down down
# last battery
up up up up left left left left left left left left up up
right right right right right right right right right up
";

fn tile_puzzle() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tile-puzzle"))
}

fn summary(stdout: &[u8]) -> serde_json::Value {
    let text = String::from_utf8(stdout.to_vec()).expect("stdout is utf-8");
    let last = text.lines().last().expect("summary line is printed");
    let value: serde_json::Value = serde_json::from_str(last).expect("summary is json");
    value["summary"].clone()
}

#[test]
fn scripted_run_clears_the_first_level() {
    let mut script = tempfile::NamedTempFile::new().expect("create script file");
    script
        .write_all(LEVEL_ONE_CLEAR.as_bytes())
        .expect("write script");

    let output = tile_puzzle()
        .args(["--agent", "script", "--format", "json", "--quiet", "--script"])
        .arg(script.path())
        .output()
        .expect("run tile-puzzle");

    assert!(output.status.success(), "scripted run should succeed");
    let summary = summary(&output.stdout);
    assert_eq!(summary["ticks"], 48);
    assert_eq!(summary["report"]["moves"], 47);
    assert_eq!(summary["level_index"], 1);
    assert_eq!(summary["batteries_remaining"], 4);
    assert_eq!(summary["score"], 3);
    assert_eq!(summary["report"]["levels_cleared"], 1);
}

#[test]
fn json_format_emits_one_record_per_tick() {
    let mut child = tile_puzzle()
        .args(["--agent", "stdin", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn tile-puzzle");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"left left\nup\n")
        .expect("write actions");
    let output = child.wait_with_output().expect("wait for tile-puzzle");

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("stdout is utf-8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4, "three ticks plus a summary");

    let second: serde_json::Value = serde_json::from_str(lines[1]).expect("tick record");
    assert_eq!(second["tick"], 1);
    assert_eq!(second["action"], "left");
    assert_eq!(second["events"][0]["MoveRejected"]["reason"], "Wall");
}

#[test]
fn tick_cap_stops_the_wanderer() {
    let output = tile_puzzle()
        .args(["--agent", "wander", "--seed", "9", "--ticks", "25"])
        .args(["--format", "json", "--quiet"])
        .output()
        .expect("run tile-puzzle");

    assert!(output.status.success());
    assert_eq!(summary(&output.stdout)["ticks"], 25);
}

#[test]
fn script_agent_without_a_path_fails() {
    let output = tile_puzzle()
        .args(["--agent", "script"])
        .output()
        .expect("run tile-puzzle");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--script"));
}
