//! # Type Registry
//!
//! Read-only lookup from a node's type key to its registry entry.
//!
//! The registry is filled once through [`TypeRegistryBuilder`] and never
//! changes afterwards. Lookups of unknown keys return `None`; callers treat
//! that as "cannot render / cannot insert", never as a crash.

use crate::builtin::builtin_blocks;
use crate::definition::BlockDefinition;
use crate::entry::{Category, RegistryEntry};
use crate::error::RegistryError;
use bricks_model::Props;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Immutable table of block types
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    /// Entries in registration order
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Registry holding every built-in block type
    pub fn builtin() -> Self {
        let mut builder = Self::builder();
        for block in builtin_blocks() {
            builder = builder.register_boxed(block);
        }
        let registry = builder.build();
        debug_assert!(registry.is_ok(), "built-in block keys collide");
        registry.unwrap_or_default()
    }

    pub fn has(&self, type_key: &str) -> bool {
        self.index.contains_key(type_key)
    }

    pub fn get(&self, type_key: &str) -> Option<&RegistryEntry> {
        self.index.get(type_key).map(|&i| &self.entries[i])
    }

    /// Entries grouped by category, registration order within each group
    pub fn list_by_category(&self) -> BTreeMap<Category, Vec<&RegistryEntry>> {
        let mut groups: BTreeMap<Category, Vec<&RegistryEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.category).or_default().push(entry);
        }
        groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schema defaults for `type_key`
    pub fn default_props(&self, type_key: &str) -> Option<Props> {
        self.get(type_key).map(RegistryEntry::default_props)
    }

    /// Unknown types never accept children
    pub fn accepts_children(&self, type_key: &str) -> bool {
        self.get(type_key)
            .map(|entry| entry.accepts_children)
            .unwrap_or(false)
    }
}

/// Collects block types before freezing them into a [`TypeRegistry`]
#[derive(Default)]
pub struct TypeRegistryBuilder {
    entries: Vec<RegistryEntry>,
}

impl TypeRegistryBuilder {
    pub fn register<B: BlockDefinition>(self, block: B) -> Self {
        self.register_entry(block.to_entry())
    }

    pub fn register_boxed(self, block: Box<dyn BlockDefinition>) -> Self {
        self.register_entry(block.to_entry())
    }

    pub fn register_entry(mut self, entry: RegistryEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Freeze the registry; fails if a type key was registered twice
    pub fn build(self) -> Result<TypeRegistry, RegistryError> {
        let mut index = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            if index.insert(entry.type_key.clone(), i).is_some() {
                return Err(RegistryError::DuplicateType(entry.type_key.clone()));
            }
        }

        debug!(types = self.entries.len(), "Block registry built");

        Ok(TypeRegistry {
            entries: self.entries,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{Container, Text, Title};
    use crate::entry::PropSchema;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_registry_lookups() {
        let registry = TypeRegistry::builtin();

        assert_eq!(registry.len(), 10);
        assert!(registry.has("title"));
        assert!(registry.has("container"));
        assert!(!registry.has("carousel"));
        assert!(registry.get("carousel").is_none());
        assert_eq!(registry.get("button").map(|e| e.display_label.as_str()), Some("Button"));
    }

    #[test]
    fn test_builtin_keys_are_unique() {
        let blocks = builtin_blocks();
        let keys: HashSet<&str> = blocks.iter().map(|block| block.type_key()).collect();

        assert_eq!(keys.len(), blocks.len());
        let builder = blocks
            .into_iter()
            .fold(TypeRegistry::builder(), TypeRegistryBuilder::register_boxed);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_list_by_category_keeps_registration_order() {
        let registry = TypeRegistry::builtin();
        let groups = registry.list_by_category();

        let categories: Vec<Category> = groups.keys().copied().collect();
        assert_eq!(
            categories,
            vec![Category::Basic, Category::Layout, Category::Media, Category::Advanced]
        );

        let basic: Vec<&str> = groups[&Category::Basic]
            .iter()
            .map(|e| e.type_key.as_str())
            .collect();
        assert_eq!(basic, vec!["title", "text", "button"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let result = TypeRegistry::builder().register(Title).register(Title).build();
        assert_eq!(result.unwrap_err(), RegistryError::DuplicateType("title".to_string()));
    }

    #[test]
    fn test_accepts_children() {
        let registry = TypeRegistry::builder()
            .register(Text)
            .register(Container)
            .build()
            .unwrap();

        assert!(registry.accepts_children("container"));
        assert!(!registry.accepts_children("text"));
        assert!(!registry.accepts_children("unknown"));
    }

    #[test]
    fn test_custom_entry() {
        let registry = TypeRegistry::builder()
            .register_entry(RegistryEntry {
                type_key: "countdown".to_string(),
                display_label: "Countdown".to_string(),
                category: Category::Advanced,
                props_schema: vec![PropSchema::text("until", "Ends at", "")],
                accepts_children: false,
            })
            .build()
            .unwrap();

        let defaults = registry.default_props("countdown").unwrap();
        assert!(defaults.contains_key("until"));
        assert!(registry.default_props("title").is_none());
    }
}
