use anyhow::{Context, Result};
use clap::Args;
use quill_customize::{Editor, IndexedLanguageClient, LanguageClient};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::output;

#[derive(Args)]
pub(crate) struct SymbolsArgs {
    /// Java file to list
    file: PathBuf,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SymbolRow {
    name: String,
    kind: String,
    /// 1-based.
    line: u32,
    container: Option<String>,
}

pub(crate) fn run(args: SymbolsArgs) -> Result<i32> {
    let workspace = args
        .file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    crate::load_config(workspace)?;

    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} is not a file", args.file.display()))?;

    let editor = Editor::from_files([(name.clone(), text)]);
    let client = IndexedLanguageClient::from_editor(&editor)?;
    let uri = editor.uri_for(&name)?;
    let rows: Vec<SymbolRow> = client
        .list_document_symbols(&uri)?
        .into_iter()
        .map(|symbol| SymbolRow {
            name: symbol.name,
            kind: format!("{:?}", symbol.kind).to_ascii_lowercase(),
            line: symbol.location.range.start.line + 1,
            container: symbol.container_name,
        })
        .collect();

    if args.json {
        output::print_json(&rows)?;
    } else {
        for row in &rows {
            match &row.container {
                Some(container) => println!(
                    "{}:{} {} {container}.{}",
                    name, row.line, row.kind, row.name
                ),
                None => println!("{}:{} {} {}", name, row.line, row.kind, row.name),
            }
        }
    }
    Ok(0)
}
