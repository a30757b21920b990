use anyhow::{Context, Result};
use clap::Args;
use quill_customize::CustomizationScript;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::output;

#[derive(Args)]
pub(crate) struct CustomizeArgs {
    /// Customization script (TOML)
    script: PathBuf,
    /// Root of the Java source tree (defaults to current directory)
    #[arg(long, default_value = ".")]
    path: PathBuf,
    /// Report the changes without writing them
    #[arg(long)]
    dry_run: bool,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Serialize)]
struct CustomizeReport {
    changed: Vec<String>,
    added: Vec<String>,
    removed: Vec<String>,
    dry_run: bool,
}

pub(crate) fn load_script(path: &Path) -> Result<CustomizationScript> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read customization script {}", path.display()))?;
    let script: CustomizationScript = toml::from_str(&text)
        .with_context(|| format!("failed to parse customization script {}", path.display()))?;
    tracing::debug!(
        target = "quill.cli",
        script = %path.display(),
        operations = script.operations.len(),
        "loaded customization script"
    );
    Ok(script)
}

pub(crate) fn run(args: CustomizeArgs) -> Result<i32> {
    crate::load_config(&args.path)?;
    let script = load_script(&args.script)?;

    let before = output::read_java_files(&args.path)?;
    let after = quill_customize::run_customization(before.clone(), &script)
        .with_context(|| format!("customization {} failed", args.script.display()))?;

    let mut report = CustomizeReport {
        dry_run: args.dry_run,
        ..CustomizeReport::default()
    };
    for (name, text) in &after {
        match before.get(name) {
            Some(old) if old == text => {}
            Some(_) => report.changed.push(name.clone()),
            None => report.added.push(name.clone()),
        }
    }
    report.removed = before
        .keys()
        .filter(|name| !after.contains_key(*name))
        .cloned()
        .collect();

    if !args.dry_run {
        for name in report.changed.iter().chain(&report.added) {
            output::write_file(&args.path, name, &after[name])?;
        }
        for name in &report.removed {
            let path = args.path.join(name);
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }
    tracing::info!(
        target = "quill.cli",
        changed = report.changed.len(),
        added = report.added.len(),
        removed = report.removed.len(),
        dry_run = args.dry_run,
        "customization applied"
    );

    if args.json {
        output::print_json(&report)?;
    } else {
        for (label, names) in [
            ("changed", &report.changed),
            ("added", &report.added),
            ("removed", &report.removed),
        ] {
            for name in names {
                println!("{label}: {name}");
            }
        }
        if report.changed.is_empty() && report.added.is_empty() && report.removed.is_empty() {
            println!("no changes");
        }
    }
    Ok(0)
}
