#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

/// Run the CLI binary against `data_dir`.
pub fn run_cli(data_dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_innkeep"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd.args(args);
    cmd.env_remove("INNKEEP_DATA_DIR");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let output = run_cli(data_dir, args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(data_dir: &Path, args: &[&str]) -> String {
    let output = run_cli(data_dir, args);
    assert!(
        !output.status.success(),
        "CLI command unexpectedly succeeded: {:?}\nstdout: {}",
        args,
        String::from_utf8_lossy(&output.stdout)
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parse one JSON record per stdout line.
pub fn records(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
        .collect()
}

/// Ids of the records printed on stdout.
pub fn ids(stdout: &str) -> Vec<u64> {
    records(stdout)
        .iter()
        .map(|r| r["id"].as_u64().expect("record without id"))
        .collect()
}
