//! Git source management.

use crate::proc::{run_checked, Invocation, Runner};
use anyhow::{Context, Result};
use std::path::Path;

/// Run a git subcommand inside `dir`, failing on non-zero exit.
pub fn git(runner: &dyn Runner, dir: &Path, args: &[&str]) -> Result<()> {
    run_checked(runner, &Invocation::new("git").args(args.iter().copied()).cwd(dir))
}

/// Clone `url` into `dir` on the first run; afterwards update in place.
///
/// The update path is fetch, checkout of the tracked branch, then a
/// fast-forward-only merge. A merge that cannot fast-forward fails the
/// whole run rather than silently creating a merge commit.
pub fn pull_repository(runner: &dyn Runner, dir: &Path, url: &str, branch: &str) -> Result<()> {
    if dir.exists() {
        git(runner, dir, &["fetch"])?;
        git(runner, dir, &["checkout", branch])?;
        git(runner, dir, &["merge", &format!("origin/{branch}"), "--ff-only"])?;
        return Ok(());
    }

    let dest = dir
        .to_str()
        .context("checkout path contains invalid UTF-8")?;
    run_checked(
        runner,
        &Invocation::new("git").args(["clone", url, dest, "-b", branch]),
    )
}
