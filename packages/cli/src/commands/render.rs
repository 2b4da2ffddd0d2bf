use super::{default_output, load_document, write_output};
use crate::config::Config;
use anyhow::Result;
use broadsheet_compiler_html::compile_to_html;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document or record JSON file
    pub input: PathBuf,

    /// Output file (defaults to <name>.html)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Skip pretty printing
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = load_document(&args.input)?;

    let mut options = config.compile_options();
    if args.compact {
        options.pretty = false;
    }
    let html = compile_to_html(&document, &options);

    if args.stdout {
        println!("{}", html);
        return Ok(());
    }

    let out = args
        .out
        .unwrap_or_else(|| default_output(&args.input, cwd, ".html"));
    let written = write_output(&out, &html)?;

    println!("  {} {} → {}", "✓".green(), args.input.display(), written);
    Ok(())
}
