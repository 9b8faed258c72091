//! A file-backed action environment for development and testing.

use std::fs;
use std::path::PathBuf;

use crate::error::HookError;
use crate::{ActionEnv, ResultBag};

/// An [`ActionEnv`] that reads the parameter bag from a JSON file and prints
/// results to stdout.
///
/// This is what `benchmark-cluster --params file.json` uses when run outside
/// the framework. Failure messages go to stderr, and the process exit code
/// reflects [`failed`](ActionEnv::failed).
#[derive(Debug)]
pub struct LocalEnv {
    params_path: PathBuf,
    failed: bool,
}

impl LocalEnv {
    /// Creates an environment reading parameters from the given JSON file.
    pub fn new(params_path: PathBuf) -> Self {
        Self {
            params_path,
            failed: false,
        }
    }
}

impl ActionEnv for LocalEnv {
    fn params_json(&self) -> Result<serde_json::Value, HookError> {
        let contents = fs::read_to_string(&self.params_path)?;
        serde_json::from_str(&contents).map_err(HookError::MalformedParams)
    }

    fn set_results(&mut self, results: &ResultBag) -> Result<(), HookError> {
        if results.is_empty() {
            return Ok(());
        }
        let rendered = serde_json::to_string_pretty(results).map_err(HookError::MalformedParams)?;
        println!("{rendered}");
        Ok(())
    }

    fn fail(&mut self, message: &str) -> Result<(), HookError> {
        self.failed = true;
        eprintln!("action failed: {message}");
        Ok(())
    }

    fn failed(&self) -> bool {
        self.failed
    }
}
