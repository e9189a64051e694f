//! External process execution.
//!
//! Everything this toolkit does ends up as a child process (git, cmake,
//! ninja, 7z, diskpart). The [`Runner`] trait is the single seam between
//! the orchestration logic and the host: production code uses
//! [`ProcessRunner`], tests substitute a scripted fake.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A single external command: program, arguments, optional working
/// directory, and an optional script to feed the child's stdin.
#[derive(Clone, Debug)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    stdin_script: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            stdin_script: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Feed `script` to the child's stdin instead of inheriting ours.
    /// Used for tools that only take commands interactively (diskpart).
    #[must_use]
    pub fn stdin_script(mut self, script: impl Into<String>) -> Self {
        self.stdin_script = Some(script.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn argv(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn script(&self) -> Option<&str> {
        self.stdin_script.as_deref()
    }

    /// The command the user would type, for echo lines and error messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Runs an [`Invocation`] to completion and reports its exit code.
pub trait Runner {
    fn run(&self, inv: &Invocation) -> Result<i32>;
}

/// Run and fail if the process exits non-zero. The error names the full
/// command line and working directory; callers add tool-level context.
pub fn run_checked(runner: &dyn Runner, inv: &Invocation) -> Result<()> {
    let code = runner.run(inv)?;
    if code != 0 {
        let cwd = inv
            .working_dir()
            .map_or_else(|| ".".to_string(), |d| d.display().to_string());
        bail!(
            "`{}` exited with status {code} (cwd: {cwd})",
            inv.command_line()
        );
    }
    Ok(())
}

/// The real runner: spawns the process with inherited stdio so build
/// output streams straight through, and blocks until it exits.
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, inv: &Invocation) -> Result<i32> {
        println!("+ {}", inv.command_line());

        let mut cmd = Command::new(inv.program());
        cmd.args(inv.argv());
        if let Some(dir) = inv.working_dir() {
            cmd.current_dir(dir);
        }

        let status = if let Some(script) = inv.script() {
            cmd.stdin(Stdio::piped());
            let mut child = cmd
                .spawn()
                .with_context(|| format!("failed to start `{}`", inv.program()))?;
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(script.as_bytes())
                    .with_context(|| format!("failed writing stdin of `{}`", inv.program()))?;
            }
            child
                .wait()
                .with_context(|| format!("failed waiting for `{}`", inv.program()))?
        } else {
            cmd.status()
                .with_context(|| format!("failed to start `{}`", inv.program()))?
        };

        // Terminated by signal: no code to report, treat as failure.
        Ok(status.code().unwrap_or(-1))
    }
}


#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn command_line_joins_program_and_args() {
        let inv = Invocation::new("git")
            .args(["merge", "origin/main", "--ff-only"])
            .cwd("/tmp/src");
        assert_eq!(inv.command_line(), "git merge origin/main --ff-only");
        assert_eq!(inv.working_dir().unwrap(), Path::new("/tmp/src"));
    }

    #[test]
    fn run_checked_reports_command_and_cwd() {
        let runner = testing::ScriptedRunner::failing_on("merge");
        let inv = Invocation::new("git").args(["merge", "--ff-only"]).cwd("/w");
        let err = run_checked(&runner, &inv).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("git merge --ff-only"), "{msg}");
        assert!(msg.contains("/w"), "{msg}");
    }

    #[test]
    fn run_checked_passes_on_zero_exit() {
        let runner = testing::ScriptedRunner::ok();
        run_checked(&runner, &Invocation::new("true")).unwrap();
        assert_eq!(runner.calls.borrow().len(), 1);
    }
}
