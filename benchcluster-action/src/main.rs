//! Binary entry point for the `benchmark-cluster` action.

use std::process::ExitCode;

use anyhow::Result;

fn main() -> Result<ExitCode> {
    benchcluster_action::cli::execute()
}
