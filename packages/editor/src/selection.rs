use bricks_model::{Node, NodeId, Tree};
use tracing::debug;

/// The block currently shown in the properties panel
///
/// Selecting does not check that the id exists: the UI may select a block
/// before the tree holding it is rendered. The selection is only dropped
/// when a change removes a node that was present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    selected: Option<NodeId>,
}

impl Selection {
    pub fn select(&mut self, id: impl Into<NodeId>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// The selected node in `tree`, or `None` if the id is stale
    pub fn resolve<'t>(&self, tree: &'t Tree) -> Option<&'t Node> {
        tree.find_node(self.selected.as_deref()?)
    }

    /// Clear the selection if the change from `before` to `after` removed
    /// the selected node (directly or with an ancestor). Returns whether it
    /// was cleared.
    pub fn reconcile(&mut self, before: &Tree, after: &Tree) -> bool {
        let Some(id) = self.selected.as_deref() else {
            return false;
        };

        if before.contains(id) && !after.contains(id) {
            debug!(node_id = %id, "Selected block removed, clearing selection");
            self.selected = None;
            return true;
        }
        false
    }
}
