//! The charm action surface for the cluster benchmark handler.
//!
//! A charm action handler exchanges data with the orchestration framework
//! through *hook tools*: small executables the framework puts on `PATH` for
//! the duration of the action. Parameters come from `action-get`, results go
//! out through `action-set`, and failures are signaled on a separate channel
//! via `action-fail`.
//!
//! This crate abstracts that surface behind the [`ActionEnv`] trait.
//! [`JujuEnv`] is the production implementation shelling out to the hook
//! tools; [`LocalEnv`] reads parameters from a JSON file and prints results
//! to stdout, which is what development runs and integration tests use.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

mod error;
mod juju;
mod local;
mod runner;

pub use crate::error::HookError;
pub use crate::juju::JujuEnv;
pub use crate::local::LocalEnv;
pub use crate::runner::{CommandRunner, SystemRunner};

/// A type-erased [`ActionEnv`] instance.
pub type BoxedEnv = Box<dyn ActionEnv>;

/// The framework surface available to an action handler.
pub trait ActionEnv: Debug {
    /// Fetches the raw parameter bag for this invocation.
    fn params_json(&self) -> Result<serde_json::Value, HookError>;

    /// Publishes the given results on the action's result bag.
    fn set_results(&mut self, results: &ResultBag) -> Result<(), HookError>;

    /// Marks the action as failed with a human-readable message.
    ///
    /// Failing does not abort the handler; subsequent steps may still run
    /// and set results.
    fn fail(&mut self, message: &str) -> Result<(), HookError>;

    /// Whether [`fail`](ActionEnv::fail) has been called during this
    /// invocation.
    fn failed(&self) -> bool;
}

/// Fetches and deserializes the parameter bag into a typed struct.
pub fn typed_params<T: DeserializeOwned>(env: &dyn ActionEnv) -> Result<T, HookError> {
    let value = env.params_json()?;
    serde_json::from_value(value).map_err(HookError::InvalidParams)
}

/// An ordered set of `key=value` results to report back to the framework.
///
/// Only keys that were explicitly set are emitted; an empty bag produces no
/// `action-set` invocation at all.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ResultBag {
    entries: BTreeMap<String, String>,
}

impl ResultBag {
    /// Creates an empty result bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a result key, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_owned(), value.into());
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether any result key has been set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the bag as `key=value` arguments for `action-set`.
    pub fn to_args(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect()
    }
}
