//! The `benchmark-cluster` action handler.
//!
//! This is a thin orchestration wrapper around `rados bench`: it reads the
//! action's parameter bag, checks that the target pool exists, runs the
//! requested benchmark and/or removes previously written benchmark data, and
//! reports structured results back to the framework.
//!
//! The handler itself is single-threaded and stateless; every external
//! effect goes through a blocking subprocess call. See [`action::run`] for
//! the decision table tying the pieces together.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod action;
pub mod cli;
pub mod observability;
pub mod params;
pub mod rados;
