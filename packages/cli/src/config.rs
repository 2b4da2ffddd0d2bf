use broadsheet_compiler_html::CompileOptions;
use broadsheet_persistence::PersistenceConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "broadsheet.config.json";

/// Broadsheet configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding autosaved drafts
    #[serde(default = "default_drafts_dir")]
    pub drafts_dir: String,

    #[serde(default)]
    pub autosave: AutosaveConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

fn default_drafts_dir() -> String {
    ".broadsheet/drafts".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutosaveConfig {
    /// Quiet period before an autosave fires
    pub debounce_ms: u64,

    /// Drafts older than this are not restored
    pub staleness_hours: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            staleness_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub pretty: bool,
    pub indent: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the drafts directory
    pub fn get_drafts_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.drafts_dir)
    }

    pub fn persistence(&self) -> PersistenceConfig {
        PersistenceConfig::from_millis(self.autosave.debounce_ms, self.autosave.staleness_hours)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            pretty: self.export.pretty,
            indent: self.export.indent.clone(),
            include_doctype: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drafts_dir: default_drafts_dir(),
            autosave: AutosaveConfig::default(),
            export: ExportConfig::default(),
        }
    }
}
