use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

/// Writes `files` (relative path to content) under `root`, creating directories as needed.
pub(crate) fn write_files(root: &Path, files: &BTreeMap<String, String>) -> Result<()> {
    for (name, text) in files {
        write_file(root, name, text)?;
    }
    Ok(())
}

pub(crate) fn write_file(root: &Path, name: &str, text: &str) -> Result<()> {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))
}

/// Every `.java` file under `root`, keyed by its `/`-separated path relative to `root`.
pub(crate) fn read_java_files(root: &Path) -> Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "java") {
            continue;
        }
        let relative = path
            .strip_prefix(root)
            .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;
        let name = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        files.insert(name, text);
    }
    tracing::debug!(
        target = "quill.cli",
        root = %root.display(),
        files = files.len(),
        "read java sources"
    );
    Ok(files)
}

/// Rewrites leading indentation from the emitter's width to `width` spaces per level.
pub(crate) fn reindent(text: &str, width: usize) -> String {
    let unit = quill_emit::INDENT.len();
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let spaces = line.len() - line.trim_start_matches(' ').len();
        let levels = spaces / unit;
        out.push_str(&" ".repeat(levels * width + spaces % unit));
        out.push_str(&line[spaces..]);
    }
    out
}
