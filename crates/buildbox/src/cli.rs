//! Command-line surface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "buildbox")]
#[command(about = "Fetch, build, and package third-party toolchain dependencies")]
pub struct Cli {
    /// Directory holding the per-tool checkouts (created if absent)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Clone tool sources, or fast-forward existing checkouts
    Fetch {
        /// Tools to operate on (default: all registered)
        tools: Vec<String>,
    },
    /// Configure and build each selected tool, in order
    Build {
        /// Tools to operate on (default: all registered)
        tools: Vec<String>,
        /// Build configuration name; may repeat (default: Release)
        #[arg(long = "config", value_name = "NAME")]
        configs: Vec<String>,
    },
    /// Archive each tool's declared artifacts into <tool>.7z
    Package {
        /// Tools to operate on (default: all registered)
        tools: Vec<String>,
    },
    /// Show checkout/build/archive state per tool
    Status {
        /// Tools to operate on (default: all registered)
        tools: Vec<String>,
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
    /// Remove tool directories
    Clean {
        /// Tools to operate on (default: all registered)
        tools: Vec<String>,
    },
    /// Check that the required host tools are on PATH
    Doctor,
}
