//! # vdisk-compact
//!
//! Shrink WSL ext4.vhdx virtual disks by scripting diskpart's
//! `compact vdisk` over its stdin. Sizes are reported before and after so
//! the reclaimed space is visible.
//!
//! ```bash
//! vdisk-compact                   # compact every registered distro
//! vdisk-compact -d Ubuntu -d Arch # only the named distros
//! ```

use anyhow::{Context, Result};
use buildbox::proc::{run_checked, Invocation, ProcessRunner, Runner};
use clap::Parser;
use std::path::Path;

mod distros;

#[derive(Parser)]
#[command(name = "vdisk-compact")]
#[command(about = "Shrink WSL ext4.vhdx disk images via diskpart")]
struct Cli {
    /// Compact only the named distro; may repeat (default: all)
    #[arg(short, long = "distro", value_name = "NAME")]
    distro: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let runner = ProcessRunner;

    for (name, vhdx) in distros::enumerate()? {
        if !selected(&cli.distro, &name) {
            println!("skipping {name}");
            continue;
        }
        println!("{name} at {}", vhdx.display());
        println!("{:.2} GiB", size_gib(&vhdx)?);
        compact(&runner, &vhdx)?;
        println!("{:.2} GiB", size_gib(&vhdx)?);
    }
    Ok(())
}

fn selected(filter: &[String], name: &str) -> bool {
    filter.is_empty() || filter.iter().any(|f| f == name)
}

fn compact(runner: &dyn Runner, vhdx: &Path) -> Result<()> {
    run_checked(
        runner,
        &Invocation::new("diskpart").stdin_script(diskpart_script(vhdx)),
    )
    .with_context(|| format!("compacting {}", vhdx.display()))
}

/// The exact command sequence diskpart expects on stdin, CRLF-terminated.
fn diskpart_script(vhdx: &Path) -> String {
    format!(
        "select vdisk file={}\r\ncompact vdisk\r\nexit\r\n",
        vhdx.display()
    )
}

fn size_gib(path: &Path) -> Result<f64> {
    let bytes = std::fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .len();
    Ok(bytes as f64 / f64::from(1024_u32.pow(3)))
}
