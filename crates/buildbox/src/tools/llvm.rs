//! The llvm/clang toolchain, built with cmake + ninja and installed into
//! the tool root.

use crate::cmake::{self, CmakeVar};
use crate::git;
use crate::proc::Runner;
use crate::tools::Tool;
use anyhow::{Context, Result};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const GIT_URL: &str = "https://github.com/llvm/llvm-project.git";
const BRANCH: &str = "main";
const MANIFEST: &str = "install_manifest.txt";

pub struct Llvm {
    root: PathBuf,
    source_dir: PathBuf,
    build_dir: PathBuf,
}

impl Llvm {
    pub fn new(base: &Path) -> Self {
        let root = base.join("llvm");
        Self {
            source_dir: root.join("src"),
            build_dir: root.join("build"),
            root,
        }
    }

    pub fn create(base: &Path) -> Box<dyn Tool> {
        Box::new(Self::new(base))
    }

    fn manifest_path(&self) -> PathBuf {
        self.build_dir.join(MANIFEST)
    }
}

impl Tool for Llvm {
    fn name(&self) -> &'static str {
        "llvm"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn fetch(&self, runner: &dyn Runner) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("creating {}", self.root.display()))?;
        git::pull_repository(runner, &self.source_dir, GIT_URL, BRANCH)
    }

    fn configure(&self, runner: &dyn Runner, _configs: &[String]) -> Result<()> {
        fs::create_dir_all(&self.build_dir)
            .with_context(|| format!("creating {}", self.build_dir.display()))?;

        cmake::configure(
            runner,
            &self.build_dir,
            &self.source_dir.join("llvm"),
            &[
                ("CMAKE_C_COMPILER", CmakeVar::Str("clang-cl")),
                ("CMAKE_CXX_COMPILER", CmakeVar::Str("clang-cl")),
                ("CMAKE_INSTALL_PREFIX", CmakeVar::Dir(self.root.clone())),
                ("LLVM_OPTIMIZED_TABLEGEN", CmakeVar::Switch(true)),
                ("LLVM_ENABLE_LLD", CmakeVar::Switch(true)),
                ("LLVM_TARGETS_TO_BUILD", CmakeVar::Str("X86;AArch64;NVPTX")),
                ("LLVM_ENABLE_PROJECTS", CmakeVar::Str("clang;clang-tools-extra;lld")),
                ("LLVM_ENABLE_BINDINGS", CmakeVar::Switch(false)),
                ("LLVM_INCLUDE_TOOLS", CmakeVar::Switch(true)),
                ("LLVM_INCLUDE_TESTS", CmakeVar::Switch(false)),
                ("LLVM_INCLUDE_BENCHMARKS", CmakeVar::Switch(false)),
                ("LLVM_INCLUDE_EXAMPLES", CmakeVar::Switch(false)),
                ("LLVM_INCLUDE_DOCS", CmakeVar::Switch(false)),
                ("CLANG_INCLUDE_TESTS", CmakeVar::Switch(false)),
                ("CLANG_INCLUDE_DOCS", CmakeVar::Switch(false)),
            ],
        )
    }

    fn build(&self, runner: &dyn Runner, _configs: &[String]) -> Result<()> {
        cmake::ninja(runner, &self.build_dir, &["install"])
    }

    fn artifacts(&self) -> Result<Vec<PathBuf>> {
        read_install_manifest(&self.manifest_path(), &self.root)
    }

    fn is_built(&self) -> bool {
        self.manifest_path().exists()
    }
}

/// Read the cmake install manifest: one installed path per line. Lines are
/// trimmed and empty ones skipped so naive splitting never yields an empty
/// artifact. Absolute paths under `install_root` are re-rooted; duplicates
/// pass through untouched.
pub fn read_install_manifest(path: &Path, install_root: &Path) -> Result<Vec<PathBuf>> {
    let file = fs::File::open(path)
        .with_context(|| format!("opening install manifest {}", path.display()))?;

    let mut paths = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let entry = Path::new(line);
        let entry = entry.strip_prefix(install_root).unwrap_or(entry);
        paths.push(entry.to_path_buf());
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::proc::testing::ScriptedRunner;

    #[test]
    fn configure_passes_the_full_option_set() {
        let runner = ScriptedRunner::ok();
        let tmp = tempfile::tempdir().unwrap();
        let tool = Llvm::new(tmp.path());
        tool.configure(&runner, &["Release".into()]).unwrap();

        let lines = runner.command_lines();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.starts_with("cmake -G Ninja -DCMAKE_BUILD_TYPE=Release"), "{line}");
        assert!(line.contains("-DCMAKE_C_COMPILER=clang-cl"), "{line}");
        assert!(line.contains("-DLLVM_TARGETS_TO_BUILD=X86;AArch64;NVPTX"), "{line}");
        assert!(line.contains("-DLLVM_ENABLE_PROJECTS=clang;clang-tools-extra;lld"), "{line}");
        assert!(line.contains("-DLLVM_INCLUDE_TESTS=OFF"), "{line}");
        assert!(line.contains(&format!(
            "-DCMAKE_INSTALL_PREFIX:PATH={}",
            tool.root().display()
        )), "{line}");
        // cwd is the build dir, source dir is the llvm subproject.
        assert!(line.ends_with(&tool.source_dir().join("llvm").display().to_string()), "{line}");
        assert_eq!(runner.calls.borrow()[0].working_dir().unwrap(), tool.build_dir);
    }

    #[test]
    fn build_installs_through_ninja() {
        let runner = ScriptedRunner::ok();
        let tmp = tempfile::tempdir().unwrap();
        let tool = Llvm::new(tmp.path());
        tool.build(&runner, &["Release".into()]).unwrap();

        let lines = runner.command_lines();
        assert_eq!(lines, vec!["ninja install"]);
    }

    #[test]
    fn manifest_lines_are_trimmed_and_empties_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join(MANIFEST);
        fs::write(&manifest, "x/y\n\n  z  \n").unwrap();

        let paths = read_install_manifest(&manifest, tmp.path()).unwrap();
        assert_eq!(paths, vec![PathBuf::from("x/y"), PathBuf::from("z")]);
    }

    #[test]
    fn absolute_manifest_lines_are_re_rooted() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join(MANIFEST);
        let installed = tmp.path().join("bin").join("clang");
        fs::write(&manifest, format!("{}\n", installed.display())).unwrap();

        let paths = read_install_manifest(&manifest, tmp.path()).unwrap();
        assert_eq!(paths, vec![PathBuf::from("bin").join("clang")]);
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = Llvm::new(tmp.path());
        assert!(tool.artifacts().is_err());
    }
}
