//! Synchronous execution of solver processes.

use std::{fmt, path::Path, process::{Command, Stdio}};

use crate::study::solver::Invocation;

/// How one solver invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    Success,
    /// The process exited unsuccessfully; `None` when killed by a signal.
    Exit(Option<i32>),
    /// The process could not be started.
    Spawn(String),
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Success)
    }
}

impl fmt::Display for InvocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationOutcome::Success => f.write_str("ok"),
            InvocationOutcome::Exit(Some(code)) => write!(f, "exit code {code}"),
            InvocationOutcome::Exit(None) => f.write_str("terminated by signal"),
            InvocationOutcome::Spawn(err) => write!(f, "failed to start: {err}"),
        }
    }
}

/// Runs solver invocations to completion.
pub trait Invoker {
    fn invoke(&mut self, invocation: &Invocation, workdir: &Path) -> InvocationOutcome;
}

/// Spawns the solver as a child process in `workdir` and waits for it, with
/// no timeout. Standard output is captured and dropped, standard error is
/// passed through.
#[derive(Debug, Default)]
pub struct ProcessInvoker;

impl Invoker for ProcessInvoker {
    fn invoke(&mut self, invocation: &Invocation, workdir: &Path) -> InvocationOutcome {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output();
        match output {
            Ok(output) if output.status.success() => InvocationOutcome::Success,
            Ok(output) => InvocationOutcome::Exit(output.status.code()),
            Err(err) => InvocationOutcome::Spawn(err.to_string()),
        }
    }
}
