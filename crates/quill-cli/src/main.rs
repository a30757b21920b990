mod customize;
mod generate;
mod output;
mod symbols;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quill_config::QuillConfig;
use std::path::Path;

#[derive(Parser)]
#[command(name = "quill", version, about = "Quill CLI (model generation, source customization)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate model sources from a code model JSON file
    Generate(generate::GenerateArgs),
    /// Apply a customization script to the Java sources under a directory
    Customize(customize::CustomizeArgs),
    /// List the symbols declared in a Java file
    Symbols(symbols::SymbolsArgs),
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Generate(args) => generate::run(args),
        Command::Customize(args) => customize::run(args),
        Command::Symbols(args) => symbols::run(args),
    }
}

/// Loads the workspace config and installs the tracing subscriber it describes.
pub(crate) fn load_config(workspace_root: &Path) -> Result<QuillConfig> {
    let (config, path) = quill_config::load_for_workspace(workspace_root).with_context(|| {
        format!(
            "failed to load config for workspace {}",
            workspace_root.display()
        )
    })?;
    quill_config::init_tracing(&config.logging);
    tracing::debug!(
        target = "quill.cli",
        workspace = %workspace_root.display(),
        config = ?path,
        "loaded workspace config"
    );
    Ok(config)
}
