//! Host preflight: are the external collaborators installed?

use anyhow::{bail, Result};

/// Programs the lifecycle phases spawn. The llvm phases run `ninja`
/// straight from PATH, so the bootstrapped copy in the ninja tool root
/// does not satisfy this.
pub const REQUIRED: &[&str] = &["git", "python", "cmake", "ninja", "7z"];

pub fn run() -> Result<()> {
    let missing = check(REQUIRED);
    if !missing.is_empty() {
        bail!("doctor checks failed: missing {}", missing.join(", "));
    }
    Ok(())
}

fn check(required: &[&str]) -> Vec<String> {
    let mut missing = Vec::new();
    for tool in required {
        if which::which(tool).is_ok() {
            eprintln!("[OK] {tool}");
        } else {
            eprintln!("[FAIL] missing `{tool}` in PATH");
            missing.push((*tool).to_string());
        }
    }
    missing
}
