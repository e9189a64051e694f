//! Managed external tools.
//!
//! Each tool owns a directory layout under the base directory and walks the
//! same lifecycle: fetch sources, configure, build, enumerate artifacts.
//! The orchestrator drives those phases in order; a tool does not police
//! out-of-order calls itself (building before fetching simply fails when
//! the source directory is missing).

pub mod llvm;
pub mod ninja;

use crate::proc::Runner;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

pub trait Tool {
    fn name(&self) -> &'static str;

    /// Directory owning everything this tool touches, including the
    /// artifact root the packager archives from.
    fn root(&self) -> &Path;

    fn source_dir(&self) -> &Path;

    /// Clone the sources on first run, fast-forward them afterwards.
    fn fetch(&self, runner: &dyn Runner) -> Result<()>;

    fn configure(&self, runner: &dyn Runner, configs: &[String]) -> Result<()>;

    fn build(&self, runner: &dyn Runner, configs: &[String]) -> Result<()>;

    /// The output paths this tool claims, relative to [`Tool::root`].
    /// Re-enumerable: each call produces the full sequence again.
    fn artifacts(&self) -> Result<Vec<PathBuf>>;

    /// Whether a previous build left its outputs in place.
    fn is_built(&self) -> bool;
}

impl std::fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool").field("name", &self.name()).finish()
    }
}

type Constructor = fn(&Path) -> Box<dyn Tool>;

/// Name-to-constructor table, built once at startup and handed to the
/// command dispatch by reference. Resolution is case-insensitive and
/// validates every name before constructing anything, so an unknown tool
/// fails the run before any side effect.
pub struct Registry {
    entries: Vec<(&'static str, Constructor)>,
}

impl Registry {
    pub fn standard() -> Self {
        Self {
            entries: vec![
                ("ninja", ninja::Ninja::create as Constructor),
                ("llvm", llvm::Llvm::create as Constructor),
            ],
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Fail on the first name with no registered constructor. Called by
    /// the dispatch before anything touches the filesystem.
    pub fn check(&self, names: &[String]) -> Result<()> {
        for name in names {
            let key = name.to_ascii_lowercase();
            if !self.entries.iter().any(|(n, _)| *n == key) {
                bail!(
                    "unknown tool `{name}` (registered: {})",
                    self.names().collect::<Vec<_>>().join(", ")
                );
            }
        }
        Ok(())
    }

    /// Resolve `names` (all registered tools when empty) against `base`,
    /// preserving the order given on the command line.
    pub fn resolve(&self, base: &Path, names: &[String]) -> Result<Vec<Box<dyn Tool>>> {
        self.check(names)?;
        if names.is_empty() {
            return Ok(self.entries.iter().map(|(_, ctor)| ctor(base)).collect());
        }

        let mut tools = Vec::with_capacity(names.len());
        for name in names {
            let key = name.to_ascii_lowercase();
            if let Some((_, ctor)) = self.entries.iter().find(|(n, _)| *n == key) {
                tools.push(ctor(base));
            }
        }
        Ok(tools)
    }
}
