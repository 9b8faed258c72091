//! The production action environment, backed by the Juju hook tools.

use std::process::Output;

use crate::error::HookError;
use crate::runner::{CommandRunner, SystemRunner};
use crate::{ActionEnv, ResultBag};

/// An [`ActionEnv`] that exchanges data with the framework through the
/// `action-get`, `action-set` and `action-fail` hook tools.
#[derive(Debug)]
pub struct JujuEnv {
    runner: Box<dyn CommandRunner>,
    failed: bool,
}

impl JujuEnv {
    /// Creates an environment spawning the real hook tools.
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemRunner))
    }

    /// Creates an environment with a custom [`CommandRunner`].
    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        Self {
            runner,
            failed: false,
        }
    }

    fn invoke(&self, tool: &'static str, args: &[String]) -> Result<Output, HookError> {
        tracing::debug!(tool, ?args, "invoking hook tool");
        let output = self.runner.run(tool, args)?;
        if !output.status.success() {
            return Err(HookError::Tool {
                tool,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output)
    }
}

impl Default for JujuEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionEnv for JujuEnv {
    fn params_json(&self) -> Result<serde_json::Value, HookError> {
        let output = self.invoke("action-get", &["--format=json".to_owned()])?;
        serde_json::from_slice(&output.stdout).map_err(HookError::MalformedParams)
    }

    fn set_results(&mut self, results: &ResultBag) -> Result<(), HookError> {
        if results.is_empty() {
            return Ok(());
        }
        self.invoke("action-set", &results.to_args())?;
        Ok(())
    }

    fn fail(&mut self, message: &str) -> Result<(), HookError> {
        self.failed = true;
        self.invoke("action-fail", &[message.to_owned()])?;
        Ok(())
    }

    fn failed(&self) -> bool {
        self.failed
    }
}
