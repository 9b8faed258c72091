use std::fmt::Debug;
use std::io;
use std::process::{Command, Output};

/// Executes external programs on behalf of the handler.
///
/// Both the hook tools and the benchmarking tool go through this seam, so
/// tests can substitute a recording implementation and assert which
/// subprocesses would have run.
pub trait CommandRunner: Debug {
    /// Runs `program` with `args`, blocking until it exits, and captures its
    /// output.
    fn run(&self, program: &str, args: &[String]) -> io::Result<Output>;
}

/// The production [`CommandRunner`], spawning real processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<Output> {
        Command::new(program).args(args).output()
    }
}
