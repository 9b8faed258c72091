use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur while talking to the framework surface.
#[derive(Debug, Error)]
pub enum HookError {
    /// A hook tool or parameter file could not be read or spawned.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A hook tool exited with a non-zero status.
    #[error("`{tool}` exited with {status}: {stderr}")]
    Tool {
        /// The hook tool that failed.
        tool: &'static str,
        /// The tool's exit status.
        status: ExitStatus,
        /// Captured standard error, if any.
        stderr: String,
    },

    /// The parameter bag was not valid JSON.
    #[error("malformed parameter bag: {0}")]
    MalformedParams(#[source] serde_json::Error),

    /// The parameter bag did not match the action's schema.
    #[error("invalid action parameters: {0}")]
    InvalidParams(#[source] serde_json::Error),
}
