mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    blocks, draft, export_template, ingest, render, BlocksArgs, DraftArgs, ExportTemplateArgs,
    IngestArgs, RenderArgs,
};

/// Broadsheet CLI - block-based newsletter designs
#[derive(Parser, Debug)]
#[command(name = "broadsheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a foreign template into a design record
    Ingest(IngestArgs),

    /// Render a design to standalone HTML
    Render(RenderArgs),

    /// Print a design in template (clipboard) form
    ExportTemplate(ExportTemplateArgs),

    /// List available block types
    Blocks(BlocksArgs),

    /// Inspect or delete autosaved drafts
    Draft(DraftArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Ingest(args) => ingest(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::ExportTemplate(args) => export_template(args, &cwd),
        Command::Blocks(args) => blocks(args, &cwd),
        Command::Draft(args) => draft(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
