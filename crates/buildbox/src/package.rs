//! Artifact packaging via 7z.

use crate::proc::{run_checked, Invocation, Runner};
use crate::tools::Tool;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;

/// Archive every tool's declared artifacts, one archive per tool.
pub fn package(runner: &dyn Runner, tools: &[Box<dyn Tool>]) -> Result<()> {
    for tool in tools {
        package_tool(runner, tool.as_ref())?;
    }
    Ok(())
}

/// Write the tool's artifact paths (relative to its root) into a temporary
/// list file and hand that to `7z a -spf`, so exactly the declared files
/// land in the archive with their full relative paths. The destination is
/// `<name>.7z` next to the tool directory; a stale archive there is
/// removed first. The list file is removed when it drops, whether or not
/// the archiver succeeded.
fn package_tool(runner: &dyn Runner, tool: &dyn Tool) -> Result<()> {
    println!("=== Packaging {} ===", tool.name());

    let archive = tool.root().with_extension("7z");
    if archive.exists() {
        fs::remove_file(&archive)
            .with_context(|| format!("removing stale archive {}", archive.display()))?;
    }

    let artifacts = tool.artifacts()?;

    let list_dir = tool.root().parent().unwrap_or(tool.root());
    let mut list = tempfile::Builder::new()
        .prefix(tool.name())
        .suffix(".files.txt")
        .tempfile_in(list_dir)
        .with_context(|| format!("creating artifact list in {}", list_dir.display()))?;
    for path in &artifacts {
        writeln!(list, "{}", path.display())?;
    }
    list.flush()?;

    run_checked(
        runner,
        &Invocation::new("7z")
            .args(["a", "-spf"])
            .arg(archive.display().to_string())
            .arg(format!("@{}", list.path().display()))
            .cwd(tool.root()),
    )
    .with_context(|| format!("packaging {} ({} artifacts)", tool.name(), artifacts.len()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::proc::testing::ScriptedRunner;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    struct FakeTool {
        root: PathBuf,
        artifacts: Vec<PathBuf>,
    }

    impl Tool for FakeTool {
        fn name(&self) -> &'static str {
            "fake"
        }
        fn root(&self) -> &Path {
            &self.root
        }
        fn source_dir(&self) -> &Path {
            &self.root
        }
        fn fetch(&self, _: &dyn Runner) -> Result<()> {
            Ok(())
        }
        fn configure(&self, _: &dyn Runner, _: &[String]) -> Result<()> {
            Ok(())
        }
        fn build(&self, _: &dyn Runner, _: &[String]) -> Result<()> {
            Ok(())
        }
        fn artifacts(&self) -> Result<Vec<PathBuf>> {
            Ok(self.artifacts.clone())
        }
        fn is_built(&self) -> bool {
            true
        }
    }

    fn fake_tool(base: &Path) -> FakeTool {
        let root = base.join("fake");
        fs::create_dir_all(&root).unwrap();
        FakeTool {
            root,
            artifacts: vec![PathBuf::from("a/b.txt"), PathBuf::from("c.txt")],
        }
    }

    /// Captures the list-file path and contents at archiver-invocation
    /// time, since the file is gone by the time the call returns.
    fn capturing_runner(exit_code: i32) -> (ScriptedRunner, Rc<RefCell<Option<(PathBuf, String)>>>) {
        let seen = Rc::new(RefCell::new(None));
        let seen_in_hook = Rc::clone(&seen);
        let runner = ScriptedRunner::with_hook(move |inv| {
            if let Some(arg) = inv.argv().iter().find_map(|a| a.strip_prefix('@')) {
                let path = PathBuf::from(arg);
                let contents = fs::read_to_string(&path).unwrap();
                *seen_in_hook.borrow_mut() = Some((path, contents));
            }
            exit_code
        });
        (runner, seen)
    }

    #[test]
    fn list_file_holds_relative_paths_and_is_cleaned_up() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = fake_tool(tmp.path());
        let (runner, seen) = capturing_runner(0);

        package_tool(&runner, &tool).unwrap();

        let (list_path, contents) = seen.borrow().clone().unwrap();
        assert_eq!(contents, "a/b.txt\nc.txt\n");
        assert!(!list_path.exists(), "list file must be removed afterwards");
    }

    #[test]
    fn list_file_is_cleaned_up_even_when_the_archiver_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = fake_tool(tmp.path());
        let (runner, seen) = capturing_runner(2);

        let err = package_tool(&runner, &tool).unwrap_err();
        assert!(format!("{err:#}").contains("packaging fake"));

        let (list_path, _) = seen.borrow().clone().unwrap();
        assert!(!list_path.exists());
    }

    #[test]
    fn stale_archive_is_removed_before_the_archiver_runs() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = fake_tool(tmp.path());
        let archive = tmp.path().join("fake.7z");
        fs::write(&archive, "old").unwrap();

        let runner = ScriptedRunner::ok();
        package_tool(&runner, &tool).unwrap();

        // The fake archiver writes nothing, so the old file staying gone
        // proves it was deleted up front.
        assert!(!archive.exists());
        let lines = runner.command_lines();
        assert!(lines[0].starts_with("7z a -spf"), "{}", lines[0]);
        assert!(lines[0].contains("fake.7z"), "{}", lines[0]);
    }

    #[test]
    fn archiver_runs_from_the_tool_root() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = fake_tool(tmp.path());
        let runner = ScriptedRunner::ok();
        package_tool(&runner, &tool).unwrap();
        assert_eq!(runner.calls.borrow()[0].working_dir().unwrap(), tool.root());
    }
}
