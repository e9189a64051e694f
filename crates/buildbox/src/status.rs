//! Per-tool state report.

use crate::tools::Tool;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
pub struct ToolStatus {
    pub name: &'static str,
    pub fetched: bool,
    pub built: bool,
    pub archive_bytes: Option<u64>,
}

impl ToolStatus {
    pub fn of(tool: &dyn Tool) -> Self {
        let archive = tool.root().with_extension("7z");
        Self {
            name: tool.name(),
            fetched: tool.source_dir().exists(),
            built: tool.is_built(),
            archive_bytes: file_size(&archive),
        }
    }
}

fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|m| m.len())
}

pub fn report(tools: &[Box<dyn Tool>], json: bool) -> Result<()> {
    let statuses: Vec<ToolStatus> = tools.iter().map(|t| ToolStatus::of(t.as_ref())).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    println!("Tool status:\n");
    for s in &statuses {
        let fetched = if s.fetched { "fetched" } else { "missing" };
        let built = if s.built { "built" } else { "not built" };
        let archive = s.archive_bytes.map_or_else(
            || "no archive".to_string(),
            |bytes| format!("archive {:.1} MB", bytes as f64 / 1_000_000.0),
        );
        println!("  {:8} [{fetched}] [{built}] [{archive}]", s.name);
    }
    Ok(())
}
