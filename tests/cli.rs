mod common;

use common::{ScratchDir, TWO_GROUPS};
use std::process::Command;

fn entroscan(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_entroscan"));
    cmd.args(args);
    cmd
}

#[test]
fn json_stdout_is_a_single_document() {
    let scratch = ScratchDir::new("cli_json");
    let input = scratch.file("two_groups.csv", TWO_GROUPS);
    let input = input.to_str().unwrap();

    for level in [None, Some("debug")] {
        let mut cmd = entroscan(&["-i", input, "-e", "0.5", "-m", "4", "--no-scale", "--json"]);
        match level {
            Some(level) => cmd.env("RUST_LOG", level),
            None => cmd.env_remove("RUST_LOG"),
        };
        let output = cmd.output().unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value["n_clusters"], 2);
        assert_eq!(value["n_noise"], 2);
    }
}

#[test]
fn labels_stdout_has_one_line_per_sample() {
    let scratch = ScratchDir::new("cli_labels");
    let input = scratch.file("two_groups.csv", TWO_GROUPS);
    let input = input.to_str().unwrap();

    let args = ["-i", input, "-e", "0.5", "-m", "4", "--no-scale", "--json", "--labels"];
    let output = entroscan(&args)
        .env("RUST_LOG", "info")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let labels: Vec<&str> = stdout.lines().rev().take(12).collect();
    assert_eq!(labels[0], "-1");
    assert_eq!(labels[1], "-1");
    assert!(stdout.lines().all(|line| !line.contains("INFO")));
}

#[test]
fn failed_load_exits_nonzero_with_empty_stdout() {
    let output = entroscan(&["-i", "/nonexistent/entroscan/capture1_trunc.txt"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}
