//! The action's parameter bag.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The access pattern exercised by `rados bench`.
///
/// `seq` and `rand` read back data written by a previous `write` run, so
/// they depend on that data still being present in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Write objects into the pool.
    Write,
    /// Read previously written objects sequentially.
    Seq,
    /// Read previously written objects in random order.
    Rand,
}

impl Mode {
    /// The mode name as passed to `rados bench`.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Write => "write",
            Mode::Seq => "seq",
            Mode::Rand => "rand",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parameter bag for a single invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionParams {
    /// Name of the pool to benchmark.
    pub pool: String,

    /// The benchmark mode; absent means "do not benchmark".
    #[serde(default)]
    pub mode: Option<Mode>,

    /// How long to run the benchmark, in seconds.
    pub seconds: u64,

    /// Concurrency level handed to `rados bench -t`.
    pub threads: u64,

    /// Object size in bytes; only used in write mode.
    pub size: u64,

    /// Whether to remove benchmark-written data afterwards.
    pub cleanup: bool,
}

/// A parameter that fails validation before any subprocess runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    /// A numeric parameter was zero.
    #[error("\"{0}\" must be a positive integer")]
    NonPositive(&'static str),
}

impl ActionParams {
    /// Checks the numeric parameters, which must all be positive.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (field, value) in [
            ("seconds", self.seconds),
            ("threads", self.threads),
            ("size", self.size),
        ] {
            if value == 0 {
                return Err(ParamsError::NonPositive(field));
            }
        }
        Ok(())
    }
}
