use super::load_document;
use anyhow::Result;
use broadsheet_ingest::export_template as to_template;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportTemplateArgs {
    /// Document or record JSON file
    pub input: PathBuf,

    /// Template id (defaults to the file name)
    #[arg(long)]
    pub id: Option<String>,

    /// Template description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

/// Print the clipboard form of a design
pub fn export_template(args: ExportTemplateArgs, _cwd: &str) -> Result<()> {
    let document = load_document(&args.input)?;

    let id = args.id.unwrap_or_else(|| {
        args.input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("template")
            .to_string()
    });

    let template = to_template(&document, &id, &args.description);
    println!("{}", template.to_json_pretty()?);
    Ok(())
}
