use crate::config::Config;
use anyhow::Result;
use broadsheet_persistence::{
    EditorInstance, FileDraftStore, PersistenceGateway, SystemClock,
};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct DraftArgs {
    #[command(subcommand)]
    pub action: DraftAction,
}

#[derive(Debug, Subcommand)]
pub enum DraftAction {
    /// Show the autosaved draft for an editor
    Show {
        /// Stored template id (omit for the new-document editor)
        #[arg(long)]
        template: Option<String>,
    },

    /// Delete the autosaved draft for an editor
    Clear {
        /// Stored template id (omit for the new-document editor)
        #[arg(long)]
        template: Option<String>,
    },
}

pub fn draft(args: DraftArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    match args.action {
        DraftAction::Show { template } => show(&gateway(&config, cwd, template), &config),
        DraftAction::Clear { template } => {
            let gateway = gateway(&config, cwd, template);
            gateway.clear()?;
            println!("  {} Cleared {}", "✓".green(), gateway.instance());
            Ok(())
        }
    }
}

fn gateway(config: &Config, cwd: &str, template: Option<String>) -> PersistenceGateway {
    let instance = match template {
        Some(id) => EditorInstance::Existing(id),
        None => EditorInstance::NewDocument,
    };
    PersistenceGateway::new(
        Arc::new(FileDraftStore::new(config.get_drafts_dir(cwd))),
        Arc::new(SystemClock),
        instance,
        &config.persistence(),
    )
}

fn show(gateway: &PersistenceGateway, config: &Config) -> Result<()> {
    let draft = match gateway.peek() {
        Ok(Some(draft)) => draft,
        Ok(None) => {
            println!("  No draft for {}", gateway.instance());
            return Ok(());
        }
        Err(e) => {
            println!(
                "  {} Draft for {} is unreadable: {}",
                "✗".red(),
                gateway.instance(),
                e
            );
            return Ok(());
        }
    };

    let age = draft.age(gateway.now_millis());
    let saved_at = chrono::DateTime::from_timestamp_millis(draft.timestamp)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| draft.timestamp.to_string());

    println!("{}", gateway.instance().to_string().bold());
    println!("   Name:   {}", draft.document.metadata.name);
    println!("   Blocks: {}", draft.document.len());
    println!("   Saved:  {} ({} min ago)", saved_at, age.as_secs() / 60);

    if !gateway.instance().restores_drafts() {
        println!("   {}", "Not restored: editor opens a stored template".dimmed());
    } else if age >= config.persistence().staleness {
        println!("   {}", "Stale: will be discarded on next open".yellow());
    } else {
        println!("   {}", "Will be restored on next open".green());
    }
    Ok(())
}
