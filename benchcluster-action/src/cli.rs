//! Command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use argh::FromArgs;
use benchcluster_hooks::{ActionEnv, BoxedEnv, JujuEnv, LocalEnv};

use crate::rados::RadosCli;
use crate::{action, observability};

/// Benchmark a storage cluster with `rados bench`.
///
/// Without arguments this runs as a charm action, exchanging parameters and
/// results through the hook tools. With `--params` it runs standalone,
/// reading parameters from a JSON file and printing results to stdout.
#[derive(Debug, FromArgs)]
struct Args {
    /// path to a JSON parameter file, bypassing the hook tools
    #[argh(option, short = 'p')]
    params: Option<PathBuf>,

    /// print the version and exit
    #[argh(switch)]
    version: bool,
}

/// Parses arguments, sets up tracing and runs the action.
///
/// The exit code reflects the action's outcome: failure reported on the
/// failure channel yields a non-zero exit.
pub fn execute() -> Result<ExitCode> {
    let args: Args = argh::from_env();

    if args.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    observability::init_tracing();

    let mut env: BoxedEnv = match args.params {
        Some(path) => Box::new(LocalEnv::new(path)),
        None => Box::new(JujuEnv::new()),
    };

    let rados = RadosCli::new();
    action::run(env.as_mut(), &rados)?;

    if env.failed() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
