//! Orchestration of the benchmark and cleanup steps.

use anyhow::Result;
use benchcluster_hooks::{ActionEnv, ResultBag, typed_params};

use crate::params::{ActionParams, Mode};
use crate::rados::RadosCli;

/// Runs the action: validate parameters, check the pool, then benchmark
/// and/or clean up.
///
/// The behavior over the three effective booleans (pool exists, mode
/// specified, cleanup requested) is a fixed decision table:
///
/// - pool absent: fail with a pointer at the pool-creation action
/// - neither mode nor cleanup: fail, there is nothing to do
/// - mode only: benchmark, then hint that `cleanup=true` removes the data
/// - mode and cleanup: benchmark, then clean up
/// - cleanup only: clean up
///
/// Each step runs at most once and is never retried. A failing benchmark
/// does not suppress a requested cleanup, and a failing cleanup is reported
/// on its own. Failures go to the environment's failure channel; this
/// function only returns `Err` when the framework surface itself is broken.
pub fn run(env: &mut dyn ActionEnv, rados: &RadosCli) -> Result<()> {
    let params: ActionParams = match typed_params(env) {
        Ok(params) => params,
        Err(err) => {
            let message = err.to_string();
            tracing::error!("{message}");
            env.fail(&message)?;
            return Ok(());
        }
    };

    if let Err(err) = params.validate() {
        let message = err.to_string();
        tracing::error!("{message}");
        env.fail(&message)?;
        return Ok(());
    }

    match rados.pool_exists(&params.pool) {
        Ok(true) => {}
        Ok(false) => {
            let message = format!("Pool \"{}\" does not exist.", params.pool);
            tracing::error!("{message}");
            env.fail(&format!(
                "{message} You can create a pool for benchmarking purposes \
                 with the \"create-pool\" action."
            ))?;
            return Ok(());
        }
        Err(err) => {
            let message = format!(
                "Failed to check whether pool \"{}\" exists: {err}",
                params.pool
            );
            tracing::error!("{message}");
            env.fail(&message)?;
            return Ok(());
        }
    }

    let mut results = ResultBag::new();

    if let Some(mode) = params.mode {
        run_benchmark(env, rados, &params, mode, &mut results)?;
        if !params.cleanup {
            results.set(
                "hint",
                "Run this action with `cleanup=true` to remove written benchmark data.",
            );
        }
    }

    if params.cleanup {
        run_cleanup(env, rados, &params.pool, &mut results)?;
    }

    if params.mode.is_none() && !params.cleanup {
        let message = "\"mode\" must be specified and/or \"cleanup\" must be \
                       \"true\" in order to perform an operation.";
        tracing::error!("{message}");
        env.fail(message)?;
    }

    env.set_results(&results)?;
    Ok(())
}

/// Runs `rados bench` and records the outcome in the result bag.
fn run_benchmark(
    env: &mut dyn ActionEnv,
    rados: &RadosCli,
    params: &ActionParams,
    mode: Mode,
    results: &mut ResultBag,
) -> Result<()> {
    tracing::info!(%mode, pool = %params.pool, seconds = params.seconds, "running benchmark");
    match rados.bench(params, mode) {
        Ok(statistics) => {
            let message = format!("{mode} benchmark successfully completed.");
            tracing::info!("{message}");
            results.set("mode", message);
            results.set("statistics", statistics);
        }
        Err(err) => {
            let message = format!("Benchmarking failed with the following error: {err}");
            tracing::error!("{message}");
            env.fail(&message)?;
            if mode != Mode::Write {
                results.set(
                    "note",
                    "Read benchmarks will fail if a write benchmark is not performed first.",
                );
            }
        }
    }
    Ok(())
}

/// Runs `rados cleanup` and records the outcome in the result bag.
fn run_cleanup(
    env: &mut dyn ActionEnv,
    rados: &RadosCli,
    pool: &str,
    results: &mut ResultBag,
) -> Result<()> {
    tracing::info!(pool, "removing benchmark data");
    match rados.cleanup(pool) {
        Ok(()) => {
            let message = "Benchmark data successfully removed.";
            tracing::info!("{message}");
            results.set("cleanup", message);
        }
        Err(err) => {
            let message = format!("Cleanup failed with the following error: {err}");
            tracing::error!("{message}");
            env.fail(&message)?;
        }
    }
    Ok(())
}
