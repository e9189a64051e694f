//! The ninja build executor, bootstrapped from its own sources.

use crate::git;
use crate::proc::{run_checked, Invocation, Runner};
use crate::tools::Tool;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const GIT_URL: &str = "https://github.com/ninja-build/ninja.git";
const BRANCH: &str = "master";

pub struct Ninja {
    root: PathBuf,
    source_dir: PathBuf,
}

impl Ninja {
    pub fn new(base: &Path) -> Self {
        let root = base.join("ninja");
        let source_dir = root.join("src");
        Self { root, source_dir }
    }

    pub fn create(base: &Path) -> Box<dyn Tool> {
        Box::new(Self::new(base))
    }

    fn executable() -> PathBuf {
        PathBuf::from(format!("ninja{}", std::env::consts::EXE_SUFFIX))
    }
}

impl Tool for Ninja {
    fn name(&self) -> &'static str {
        "ninja"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn fetch(&self, runner: &dyn Runner) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("creating {}", self.root.display()))?;
        git::pull_repository(runner, &self.source_dir, GIT_URL, BRANCH)
    }

    fn configure(&self, _runner: &dyn Runner, _configs: &[String]) -> Result<()> {
        // The bootstrap build configures itself.
        Ok(())
    }

    fn build(&self, runner: &dyn Runner, _configs: &[String]) -> Result<()> {
        let script = self.source_dir.join("configure.py");
        let script = script
            .to_str()
            .context("source path contains invalid UTF-8")?;
        run_checked(
            runner,
            &Invocation::new("python")
                .args([script, "--bootstrap"])
                .cwd(&self.root),
        )
    }

    fn artifacts(&self) -> Result<Vec<PathBuf>> {
        // The bootstrap drops exactly one binary next to the sources.
        Ok(vec![Self::executable()])
    }

    fn is_built(&self) -> bool {
        self.root.join(Self::executable()).exists()
    }
}
