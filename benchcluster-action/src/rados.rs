//! Invocation of the `rados` benchmarking tool.

use std::io;
use std::process::{ExitStatus, Output};

use benchcluster_hooks::{CommandRunner, SystemRunner};
use thiserror::Error;

use crate::params::{ActionParams, Mode};

/// The cluster user used for the pool-existence check.
const ADMIN_ID: &str = "admin";

/// Errors from invoking the external `rados` tool.
#[derive(Debug, Error)]
pub enum RadosError {
    /// The tool could not be spawned at all.
    #[error("failed to run `rados {subcommand}`: {source}")]
    Spawn {
        /// The `rados` subcommand that was being run.
        subcommand: &'static str,
        /// The underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// The tool ran but exited with a non-zero status.
    #[error("`rados {subcommand}` exited with {status}: {stderr}")]
    Failed {
        /// The `rados` subcommand that failed.
        subcommand: &'static str,
        /// The tool's exit status.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },
}

/// A blocking wrapper around the `rados` command-line tool.
#[derive(Debug)]
pub struct RadosCli {
    runner: Box<dyn CommandRunner>,
}

impl RadosCli {
    /// Creates a wrapper spawning the real `rados` binary.
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemRunner))
    }

    /// Creates a wrapper with a custom [`CommandRunner`].
    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Whether the named pool exists in the cluster.
    ///
    /// Lists all pools as the admin user and looks for an exact line match.
    pub fn pool_exists(&self, pool: &str) -> Result<bool, RadosError> {
        let args = vec![
            "--id".to_owned(),
            ADMIN_ID.to_owned(),
            "lspools".to_owned(),
        ];
        let output = self.invoke("lspools", &args)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().any(|line| line.trim() == pool))
    }

    /// Runs `rados bench` with the given parameters and returns its stdout,
    /// which carries the throughput and latency statistics.
    pub fn bench(&self, params: &ActionParams, mode: Mode) -> Result<String, RadosError> {
        let args = bench_args(params, mode);
        let output = self.invoke("bench", &args)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs `rados cleanup`, removing data written by a previous write-mode
    /// benchmark. The tool's output is discarded.
    pub fn cleanup(&self, pool: &str) -> Result<(), RadosError> {
        let args = vec!["cleanup".to_owned(), "-p".to_owned(), pool.to_owned()];
        self.invoke("cleanup", &args)?;
        Ok(())
    }

    fn invoke(&self, subcommand: &'static str, args: &[String]) -> Result<Output, RadosError> {
        let output = self
            .runner
            .run("rados", args)
            .map_err(|source| RadosError::Spawn { subcommand, source })?;
        if !output.status.success() {
            return Err(RadosError::Failed {
                subcommand,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output)
    }
}

impl Default for RadosCli {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the argument list for `rados bench`.
///
/// Object size is only valid in write mode, and write mode keeps its data
/// around (`--no-cleanup`) so that read benchmarks and the cleanup step have
/// something to work with.
pub fn bench_args(params: &ActionParams, mode: Mode) -> Vec<String> {
    let mut args = vec![
        "bench".to_owned(),
        params.seconds.to_string(),
        mode.as_str().to_owned(),
        "-p".to_owned(),
        params.pool.clone(),
        "-t".to_owned(),
        params.threads.to_string(),
    ];
    if mode == Mode::Write {
        args.push("-b".to_owned());
        args.push(params.size.to_string());
        args.push("--no-cleanup".to_owned());
    }
    args
}
