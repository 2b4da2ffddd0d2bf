use super::{default_output, write_output};
use anyhow::{anyhow, Result};
use broadsheet_ingest::{ingest_str, DiagnosticLevel};
use broadsheet_schema::DocumentRecord;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Template JSON file
    pub input: PathBuf,

    /// Output file (defaults to <name>.document.json)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn ingest(args: IngestArgs, cwd: &str) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .map_err(|e| anyhow!("Cannot read {}: {}", args.input.display(), e))?;

    let report = ingest_str(&text)?;
    tracing::debug!(
        "Ingested {} with {} diagnostics",
        args.input.display(),
        report.diagnostics.len()
    );

    for diagnostic in &report.diagnostics {
        let label = match diagnostic.level {
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };
        eprintln!("  {} {}", label, diagnostic);
    }

    let skipped = report.skipped().count();
    let document = report.into_document();
    let record = DocumentRecord::from_document(&document);
    let output = serde_json::to_string_pretty(&record)?;

    if args.stdout {
        println!("{}", output);
        return Ok(());
    }

    let out = args
        .out
        .unwrap_or_else(|| default_output(&args.input, cwd, ".document.json"));
    let written = write_output(&out, &output)?;

    println!(
        "  {} {} → {} ({} blocks, {} skipped)",
        "✓".green(),
        args.input.display(),
        written,
        document.len(),
        skipped
    );
    Ok(())
}
