//! buildbox: a small personal build-orchestration toolkit.
//!
//! Automates pulling, configuring, building, and packaging a fixed list of
//! third-party dependencies (the ninja build executor and the llvm
//! toolchain). Every operation is a thin sequential wrapper over external
//! processes; only exit codes are inspected, plus the one install-manifest
//! file cmake writes.
//!
//! Structure:
//! - `proc` - process-execution seam ([`proc::Runner`], [`proc::ProcessRunner`])
//! - `git` - clone / fast-forward source management
//! - `cmake` - cmake configure and ninja wrappers
//! - `tools` - per-tool descriptors and the name registry
//! - `package` - 7z artifact archiving
//! - `status`, `clean` (in `app`), `doctor` - housekeeping
//! - `cli`, `app` - clap surface and dispatch

pub mod app;
pub mod cli;
pub mod cmake;
pub mod doctor;
pub mod git;
pub mod package;
pub mod proc;
pub mod status;
pub mod tools;
