use serde::{Deserialize, Serialize};

/// Editor settings; every field has a default so partial files load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Undo levels kept per page (0 = unlimited)
    pub history_limit: usize,

    /// Appended to the name of a duplicated page
    pub duplicate_suffix: String,

    /// Name of the page a new session starts with
    pub default_page_name: String,

    /// Fixed seed for generated ids; derived from the session id when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_seed: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 100,
            duplicate_suffix: " (copy)".to_string(),
            default_page_name: "Home".to_string(),
            id_seed: None,
        }
    }
}
