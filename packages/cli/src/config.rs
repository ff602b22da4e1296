use bricks_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "bricks.config.json";

/// Bricks configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Editing engine settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Project file used when a command is given none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
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

    /// Resolve the project file: explicit argument first, then config
    pub fn project_path(&self, cwd: &str, explicit: Option<&str>) -> anyhow::Result<PathBuf> {
        explicit
            .or(self.project.as_deref())
            .map(|file| PathBuf::from(cwd).join(file))
            .ok_or_else(|| {
                anyhow::anyhow!("No project file given and none set in {}", DEFAULT_CONFIG_NAME)
            })
    }
}
