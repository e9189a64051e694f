//! Command dispatch and the sequential lifecycle loops.

use crate::cli::{Cli, Cmd};
use crate::proc::Runner;
use crate::tools::{Registry, Tool};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "Release";

pub fn run(runner: &dyn Runner, cli: Cli) -> Result<()> {
    let registry = Registry::standard();
    // Unknown names must fail before any side effect, directory creation
    // included.
    registry.check(selected_names(&cli.cmd))?;

    // Resolved lazily so `doctor` never touches the base directory.
    let resolve = |tools: &[String]| registry.resolve(&prepare_base(&cli.root)?, tools);

    match cli.cmd {
        Cmd::Fetch { ref tools } => fetch(runner, &resolve(tools)?),
        Cmd::Build {
            ref tools,
            ref configs,
        } => build(runner, &resolve(tools)?, &effective_configs(configs.clone())),
        Cmd::Package { ref tools } => crate::package::package(runner, &resolve(tools)?),
        Cmd::Status { ref tools, json } => crate::status::report(&resolve(tools)?, json),
        Cmd::Clean { ref tools } => clean(&resolve(tools)?),
        Cmd::Doctor => crate::doctor::run(),
    }
}

fn selected_names(cmd: &Cmd) -> &[String] {
    match cmd {
        Cmd::Fetch { tools }
        | Cmd::Build { tools, .. }
        | Cmd::Package { tools }
        | Cmd::Status { tools, .. }
        | Cmd::Clean { tools } => tools,
        Cmd::Doctor => &[],
    }
}

/// Archive destinations and the 7z working directory are resolved against
/// the child's cwd, so the base must be absolute before any tool sees it.
fn prepare_base(root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(root).with_context(|| format!("creating {}", root.display()))?;
    root.canonicalize()
        .with_context(|| format!("resolving {}", root.display()))
}

fn effective_configs(configs: Vec<String>) -> Vec<String> {
    if configs.is_empty() {
        vec![DEFAULT_CONFIG.to_string()]
    } else {
        configs
    }
}

/// Update or clone sources for each tool, in order. The first failure
/// aborts the remaining tools.
pub fn fetch(runner: &dyn Runner, tools: &[Box<dyn Tool>]) -> Result<()> {
    for tool in tools {
        println!("=== Fetching {} ===", tool.name());
        tool.fetch(runner)?;
    }
    Ok(())
}

/// Configure then build each tool, in order, forwarding the configuration
/// names unchanged to both phases.
pub fn build(runner: &dyn Runner, tools: &[Box<dyn Tool>], configs: &[String]) -> Result<()> {
    for tool in tools {
        println!(
            "=== Building {} ({}) at {} ===",
            tool.name(),
            configs.join(", "),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        tool.configure(runner, configs)?;
        tool.build(runner, configs)?;
    }
    Ok(())
}

/// Remove each tool's directory tree. Archives next to it are kept.
pub fn clean(tools: &[Box<dyn Tool>]) -> Result<()> {
    for tool in tools {
        if tool.root().exists() {
            fs::remove_dir_all(tool.root())
                .with_context(|| format!("removing {}", tool.root().display()))?;
            println!("Cleaned: {}", tool.name());
        } else {
            println!("{} not present", tool.name());
        }
    }
    Ok(())
}
