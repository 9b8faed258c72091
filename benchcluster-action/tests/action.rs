//! End-to-end tests spawning the real binary against a fake `rados`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const ACTION_EXE: &str = env!("CARGO_BIN_EXE_benchmark-cluster");

/// A fake `rados` that records its arguments and answers `lspools` with a
/// fixed pool list. Individual subcommands can be made to fail through
/// environment variables.
const FAKE_RADOS: &str = r#"#!/bin/sh
echo "rados $*" >> "$RADOS_LOG"
case "$*" in
  *lspools*)
    printf 'rbd\nbench\n'
    ;;
  bench*)
    [ -n "$RADOS_FAIL_BENCH" ] && { echo 'bench exploded' >&2; exit 1; }
    printf 'Total time run: 10\nBandwidth (MB/sec): 100.0\n'
    ;;
  cleanup*)
    [ -n "$RADOS_FAIL_CLEANUP" ] && { echo 'cleanup exploded' >&2; exit 1; }
    ;;
esac
exit 0
"#;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();

        let rados = dir.path().join("rados");
        fs::write(&rados, FAKE_RADOS).unwrap();
        fs::set_permissions(&rados, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    fn params(&self, json: &str) -> PathBuf {
        let path = self.dir.path().join("params.json");
        fs::write(&path, json).unwrap();
        path
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("rados.log")
    }

    /// Every `rados` invocation, in order, as recorded by the fake.
    fn rados_calls(&self) -> Vec<String> {
        match fs::read_to_string(self.log_path()) {
            Ok(log) => log.lines().map(str::to_owned).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn run(&self, params: &Path, extra_env: &[(&str, &str)]) -> Output {
        let path = format!(
            "{}:{}",
            self.dir.path().display(),
            std::env::var("PATH").unwrap()
        );

        let mut command = Command::new(ACTION_EXE);
        command
            .arg("--params")
            .arg(params)
            .env("PATH", path)
            .env("RADOS_LOG", self.log_path());
        for (key, value) in extra_env {
            command.env(key, value);
        }
        command.output().expect("Failed to spawn subprocess")
    }
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON result bag")
}

#[test]
fn write_benchmark_with_cleanup() {
    let sandbox = Sandbox::new();
    let params = sandbox.params(
        r#"{"pool": "bench", "mode": "write", "seconds": 10, "threads": 4, "size": 4096, "cleanup": true}"#,
    );

    let output = sandbox.run(&params, &[]);
    assert!(output.status.success(), "{output:?}");

    let results = stdout_json(&output);
    assert_eq!(results["mode"], "write benchmark successfully completed.");
    assert!(
        results["statistics"]
            .as_str()
            .unwrap()
            .contains("Bandwidth")
    );
    assert_eq!(results["cleanup"], "Benchmark data successfully removed.");
    assert!(results.get("hint").is_none());

    assert_eq!(
        sandbox.rados_calls(),
        vec![
            "rados --id admin lspools",
            "rados bench 10 write -p bench -t 4 -b 4096 --no-cleanup",
            "rados cleanup -p bench",
        ]
    );
}

#[test]
fn seq_benchmark_without_cleanup_hints() {
    let sandbox = Sandbox::new();
    let params = sandbox.params(
        r#"{"pool": "bench", "mode": "seq", "seconds": 10, "threads": 4, "size": 4096, "cleanup": false}"#,
    );

    let output = sandbox.run(&params, &[]);
    assert!(output.status.success(), "{output:?}");

    let results = stdout_json(&output);
    assert_eq!(results["mode"], "seq benchmark successfully completed.");
    assert!(results["hint"].as_str().unwrap().contains("cleanup=true"));

    // No object size and no `--no-cleanup` outside of write mode.
    assert_eq!(
        sandbox.rados_calls(),
        vec!["rados --id admin lspools", "rados bench 10 seq -p bench -t 4"]
    );
}

#[test]
fn missing_pool_fails_without_benchmarking() {
    let sandbox = Sandbox::new();
    let params = sandbox.params(
        r#"{"pool": "missing", "mode": "write", "seconds": 10, "threads": 4, "size": 4096, "cleanup": false}"#,
    );

    let output = sandbox.run(&params, &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Pool \"missing\" does not exist."));
    assert!(stderr.contains("\"create-pool\" action"));

    assert_eq!(sandbox.rados_calls(), vec!["rados --id admin lspools"]);
}

#[test]
fn no_mode_and_no_cleanup_is_an_error() {
    let sandbox = Sandbox::new();
    let params = sandbox.params(
        r#"{"pool": "bench", "seconds": 10, "threads": 4, "size": 4096, "cleanup": false}"#,
    );

    let output = sandbox.run(&params, &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"mode\" must be specified"));

    assert_eq!(sandbox.rados_calls(), vec!["rados --id admin lspools"]);
}

#[test]
fn failed_read_benchmark_notes_the_write_dependency() {
    let sandbox = Sandbox::new();
    let params = sandbox.params(
        r#"{"pool": "bench", "mode": "rand", "seconds": 10, "threads": 4, "size": 4096, "cleanup": false}"#,
    );

    let output = sandbox.run(&params, &[("RADOS_FAIL_BENCH", "1")]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Benchmarking failed"));

    let results = stdout_json(&output);
    assert!(
        results["note"]
            .as_str()
            .unwrap()
            .contains("write benchmark")
    );
}

#[test]
fn cleanup_failure_still_reports_benchmark_results() {
    let sandbox = Sandbox::new();
    let params = sandbox.params(
        r#"{"pool": "bench", "mode": "write", "seconds": 10, "threads": 4, "size": 4096, "cleanup": true}"#,
    );

    let output = sandbox.run(&params, &[("RADOS_FAIL_CLEANUP", "1")]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cleanup failed"));

    let results = stdout_json(&output);
    assert_eq!(results["mode"], "write benchmark successfully completed.");
    assert!(results.get("cleanup").is_none());
}

#[test]
fn version_switch_prints_and_exits() {
    let output = Command::new(ACTION_EXE)
        .arg("--version")
        .output()
        .expect("Failed to spawn subprocess");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), env!("CARGO_PKG_VERSION"));
}
