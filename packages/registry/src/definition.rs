use crate::entry::{Category, PropSchema, RegistryEntry};

/// A block type the editor can place on a page
///
/// Each block type provides:
/// - Display metadata for the palette
/// - The inspector schema of its editable props
/// - Whether it can hold child blocks
pub trait BlockDefinition: Send + Sync {
    /// Registry key stored in each node's `type`
    fn type_key(&self) -> &'static str;

    fn display_label(&self) -> &'static str;

    fn category(&self) -> Category;

    /// Editable props, in the order the properties panel lists them
    fn props_schema(&self) -> Vec<PropSchema>;

    fn accepts_children(&self) -> bool {
        false
    }

    fn to_entry(&self) -> RegistryEntry {
        RegistryEntry {
            type_key: self.type_key().to_string(),
            display_label: self.display_label().to_string(),
            category: self.category(),
            props_schema: self.props_schema(),
            accepts_children: self.accepts_children(),
        }
    }
}
