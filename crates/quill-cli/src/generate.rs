use anyhow::{Context, Result};
use clap::Args;
use quill_templates::CodeModel;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::output;

#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Code model JSON written by the mapper
    code_model: PathBuf,
    /// Directory the sources are written under (defaults to the workspace root)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Workspace root holding `quill.toml` (defaults to current directory)
    #[arg(long, default_value = ".")]
    path: PathBuf,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct GenerateReport {
    package: String,
    files: Vec<String>,
    customized: bool,
}

pub(crate) fn run(args: GenerateArgs) -> Result<i32> {
    let config = crate::load_config(&args.path)?;

    let text = fs::read_to_string(&args.code_model)
        .with_context(|| format!("failed to read {}", args.code_model.display()))?;
    let mut code_model = CodeModel::from_json(&text)
        .with_context(|| format!("failed to parse {}", args.code_model.display()))?;
    if let Some(package) = &config.generator.base_package {
        code_model.package_name = package.clone();
    }

    let mut files = quill_templates::generate(&code_model)
        .context("failed to generate models")?
        .render();

    let customized = match &config.generator.customization {
        Some(script_path) => {
            let script = crate::customize::load_script(script_path)?;
            files = quill_customize::run_customization(files, &script)
                .with_context(|| format!("customization {} failed", script_path.display()))?;
            true
        }
        None => false,
    };

    let width = config.generator.indent_width;
    if width != quill_emit::INDENT.len() {
        for text in files.values_mut() {
            *text = output::reindent(text, width);
        }
    }

    let out = args.out.unwrap_or(args.path);
    output::write_files(&out, &files)?;
    tracing::info!(
        target = "quill.cli",
        out = %out.display(),
        files = files.len(),
        customized,
        "wrote generated sources"
    );

    let report = GenerateReport {
        package: code_model.package_name,
        files: files.into_keys().collect(),
        customized,
    };
    if args.json {
        output::print_json(&report)?;
    } else {
        println!("generated: {} ({} files)", report.package, report.files.len());
        for file in &report.files {
            println!("  {file}");
        }
        if report.customized {
            println!("customized: yes");
        }
    }
    Ok(0)
}
