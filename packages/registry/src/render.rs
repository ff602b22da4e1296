//! Renderer capability
//!
//! The editor never renders anything itself. A UI registers one renderer per
//! block type and looks them up here; output type `V` is whatever the UI
//! draws with.

use crate::error::RegistryError;
use crate::registry::TypeRegistry;
use bricks_model::Node;
use std::collections::HashMap;
use tracing::warn;

/// Draws one node
pub trait Renderer<V>: Send + Sync {
    fn render(&self, node: &Node, selected: bool) -> V;
}

impl<V, F> Renderer<V> for F
where
    F: Fn(&Node, bool) -> V + Send + Sync,
{
    fn render(&self, node: &Node, selected: bool) -> V {
        self(node, selected)
    }
}

/// Renderer per registered block type
pub struct RenderTable<V> {
    renderers: HashMap<String, Box<dyn Renderer<V>>>,
}

impl<V> Default for RenderTable<V> {
    fn default() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }
}

impl<V> RenderTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer; the type must exist in `registry`
    pub fn register<R>(
        &mut self,
        registry: &TypeRegistry,
        type_key: &str,
        renderer: R,
    ) -> Result<(), RegistryError>
    where
        R: Renderer<V> + 'static,
    {
        if !registry.has(type_key) {
            return Err(RegistryError::UnknownType(type_key.to_string()));
        }
        self.renderers.insert(type_key.to_string(), Box::new(renderer));
        Ok(())
    }

    pub fn has(&self, type_key: &str) -> bool {
        self.renderers.contains_key(type_key)
    }

    /// Render `node`, or `None` if its type has no renderer
    pub fn render(&self, node: &Node, selected: bool) -> Option<V> {
        match self.renderers.get(node.kind()) {
            Some(renderer) => Some(renderer.render(node, selected)),
            None => {
                warn!(kind = %node.kind(), node_id = %node.id(), "No renderer for block type");
                None
            }
        }
    }
}
