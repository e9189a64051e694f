//! cmake and ninja wrappers.

use crate::proc::{run_checked, Invocation, Runner};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One `-D` cache variable on the cmake command line.
pub enum CmakeVar {
    Str(&'static str),
    /// PATH-typed so cmake normalizes Windows backslashes.
    Dir(PathBuf),
    Switch(bool),
}

pub fn var_args(vars: &[(&str, CmakeVar)]) -> Vec<String> {
    vars.iter()
        .map(|(name, value)| match value {
            CmakeVar::Str(s) => format!("-D{name}={s}"),
            CmakeVar::Dir(p) => format!("-D{name}:PATH={}", p.display()),
            CmakeVar::Switch(true) => format!("-D{name}=ON"),
            CmakeVar::Switch(false) => format!("-D{name}=OFF"),
        })
        .collect()
}

/// Generate Ninja build files for a release build of `source_dir` into
/// `build_dir`, with `vars` appended after the build-type definition.
pub fn configure(
    runner: &dyn Runner,
    build_dir: &Path,
    source_dir: &Path,
    vars: &[(&str, CmakeVar)],
) -> Result<()> {
    let source = source_dir
        .to_str()
        .context("source path contains invalid UTF-8")?;

    run_checked(
        runner,
        &Invocation::new("cmake")
            .args(["-G", "Ninja", "-DCMAKE_BUILD_TYPE=Release"])
            .args(var_args(vars))
            .arg(source)
            .cwd(build_dir),
    )
    .with_context(|| {
        format!(
            "cmake configure failed (build dir {}, source dir {})",
            build_dir.display(),
            source_dir.display()
        )
    })
}

/// Run the build executor in `build_dir` and report elapsed wall-clock time.
pub fn ninja(runner: &dyn Runner, build_dir: &Path, targets: &[&str]) -> Result<()> {
    let started = Instant::now();
    run_checked(
        runner,
        &Invocation::new("ninja").args(targets.iter().copied()).cwd(build_dir),
    )?;
    println!("time elapsed: {:.1} s", started.elapsed().as_secs_f64());
    Ok(())
}
