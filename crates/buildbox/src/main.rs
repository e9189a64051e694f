//! # buildbox
//!
//! Fetch, build, and package a fixed set of third-party toolchain
//! dependencies.
//!
//! ## Usage
//!
//! ```bash
//! buildbox fetch                 # clone or fast-forward all tool sources
//! buildbox build                 # configure + build everything (Release)
//! buildbox build llvm --config Debug --config Release
//! buildbox package ninja         # archive the declared artifacts
//! buildbox status --json        # machine-readable per-tool state
//! buildbox doctor                # verify git/python/cmake/ninja/7z are on PATH
//! ```

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = buildbox::cli::Cli::parse();
    buildbox::app::run(&buildbox::proc::ProcessRunner, cli)
}
