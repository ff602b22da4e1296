//! Project files: the pages of a site saved as JSON

use anyhow::{Context, Result};
use bricks_editor::{EditSession, EditorConfig, Page};
use bricks_registry::TypeRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Project {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid project file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))
    }

    /// Open an edit session over the project's pages.
    ///
    /// The session is named after the file so generated ids stay stable
    /// between runs.
    pub fn into_session(self, path: &Path, config: EditorConfig) -> Result<EditSession> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());

        let registry = Arc::new(TypeRegistry::builtin());
        let session = EditSession::load(name, registry, config, self.pages)?;
        Ok(session)
    }

    pub fn from_session(session: EditSession) -> Self {
        Self {
            pages: session.into_pages(),
        }
    }
}
