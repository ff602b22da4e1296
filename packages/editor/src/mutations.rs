//! # Block Mutations
//!
//! The edits a user can make to a page tree.
//!
//! ## Semantics
//!
//! Every mutation reads the current tree and produces a new one. The input is
//! never modified, so a failed or declined mutation cannot corrupt anything.
//!
//! ### Insert
//! - The block type must exist in the registry, otherwise the insert is
//!   declined with [`MutationError::UnknownType`]
//! - New nodes start from the registry defaults with the caller's props
//!   merged over them
//! - Inserting into a block whose type cannot hold children is declined
//!
//! ### UpdateProps
//! - Shallow merge, later keys win
//! - A merge that changes nothing is a no-op
//!
//! ### Remove
//! - Removes the node and every descendant
//!
//! ### Duplicate
//! - Deep copy with fresh ids, placed right after the original in the same
//!   list
//!
//! ### MoveUp / MoveDown
//! - Swap with the neighbouring sibling; no-op at either end of the list
//!
//! Any mutation that targets a missing node is a no-op (`Ok(None)`).

use bricks_model::{Direction, IdGenerator, Node, NodeId, Props, Tree};
use bricks_registry::TypeRegistry;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::MutationError;

/// User-level edits to a page tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a new block to the root list
    InsertAtRoot {
        block_type: String,
        #[serde(default)]
        props: Props,
    },

    /// Insert a new block into the root list at `index`
    InsertAt {
        index: usize,
        block_type: String,
        #[serde(default)]
        props: Props,
    },

    /// Insert a new block among the children of a container block
    InsertInto {
        parent_id: NodeId,
        index: usize,
        block_type: String,
        #[serde(default)]
        props: Props,
    },

    /// Merge props into a block
    UpdateProps { node_id: NodeId, props: Props },

    /// Remove a block and its descendants
    Remove { node_id: NodeId },

    /// Copy a block (and descendants) next to itself
    Duplicate { node_id: NodeId },

    MoveUp { node_id: NodeId },

    MoveDown { node_id: NodeId },
}

/// Tree produced by a mutation that changed something
#[derive(Debug, Clone)]
pub struct Applied {
    pub tree: Tree,

    /// Id of the block the mutation created, if any
    pub created: Option<NodeId>,
}

impl Applied {
    fn changed(tree: Tree) -> Self {
        Self {
            tree,
            created: None,
        }
    }

    fn created(tree: Tree, id: NodeId) -> Self {
        Self {
            tree,
            created: Some(id),
        }
    }
}

impl Mutation {
    /// Name used for history descriptions and logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertAtRoot { .. } => "Insert block",
            Mutation::InsertAt { .. } => "Insert block",
            Mutation::InsertInto { .. } => "Insert child block",
            Mutation::UpdateProps { .. } => "Update block",
            Mutation::Remove { .. } => "Remove block",
            Mutation::Duplicate { .. } => "Duplicate block",
            Mutation::MoveUp { .. } => "Move block up",
            Mutation::MoveDown { .. } => "Move block down",
        }
    }

    /// Apply to `tree`.
    ///
    /// Returns `Ok(None)` when the mutation changes nothing.
    pub fn apply(
        &self,
        tree: &Tree,
        registry: &TypeRegistry,
        ids: &mut IdGenerator,
    ) -> Result<Option<Applied>, MutationError> {
        let applied = match self {
            Mutation::InsertAtRoot { block_type, props } => {
                let (tree, id) = insert_at(tree, registry, ids, tree.len(), block_type, props)?;
                Some(Applied::created(tree, id))
            }

            Mutation::InsertAt {
                index,
                block_type,
                props,
            } => {
                let (tree, id) = insert_at(tree, registry, ids, *index, block_type, props)?;
                Some(Applied::created(tree, id))
            }

            Mutation::InsertInto {
                parent_id,
                index,
                block_type,
                props,
            } => insert_into(tree, registry, ids, parent_id, *index, block_type, props)?
                .map(|(tree, id)| Applied::created(tree, id)),

            Mutation::UpdateProps { node_id, props } => {
                update_props(tree, node_id, props).map(Applied::changed)
            }

            Mutation::Remove { node_id } => remove(tree, node_id).map(Applied::changed),

            Mutation::Duplicate { node_id } => {
                duplicate(tree, ids, node_id).map(|(tree, id)| Applied::created(tree, id))
            }

            Mutation::MoveUp { node_id } => {
                move_node(tree, node_id, Direction::Up).map(Applied::changed)
            }

            Mutation::MoveDown { node_id } => {
                move_node(tree, node_id, Direction::Down).map(Applied::changed)
            }
        };

        Ok(applied)
    }
}

/// Build a new block of `block_type`: registry defaults, then `props`
pub fn build_node(
    registry: &TypeRegistry,
    ids: &mut IdGenerator,
    block_type: &str,
    props: &Props,
) -> Result<Node, MutationError> {
    let Some(entry) = registry.get(block_type) else {
        warn!(block_type, "Declined insert of unknown block type");
        return Err(MutationError::UnknownType(block_type.to_string()));
    };

    let mut initial = entry.default_props();
    initial.extend(props.iter().map(|(k, v)| (k.clone(), v.clone())));

    Ok(Node::new(ids.new_id(), block_type, initial))
}

/// Insert a new block into the root list at `index` (clamped)
pub fn insert_at(
    tree: &Tree,
    registry: &TypeRegistry,
    ids: &mut IdGenerator,
    index: usize,
    block_type: &str,
    props: &Props,
) -> Result<(Tree, NodeId), MutationError> {
    let node = build_node(registry, ids, block_type, props)?;
    let id = node.id().to_string();
    debug!(node_id = %id, block_type, index, "Inserting block");
    Ok((tree.insert_at(index, node), id))
}

/// Insert a new block as a child of `parent_id` at `index` (clamped)
pub fn insert_into(
    tree: &Tree,
    registry: &TypeRegistry,
    ids: &mut IdGenerator,
    parent_id: &str,
    index: usize,
    block_type: &str,
    props: &Props,
) -> Result<Option<(Tree, NodeId)>, MutationError> {
    if !registry.has(block_type) {
        warn!(block_type, "Declined insert of unknown block type");
        return Err(MutationError::UnknownType(block_type.to_string()));
    }

    let Some(parent) = tree.find_node(parent_id) else {
        debug!(parent_id, "Insert target no longer exists");
        return Ok(None);
    };

    if !registry.accepts_children(parent.kind()) {
        warn!(parent_id, kind = %parent.kind(), "Declined insert into non-container block");
        return Err(MutationError::NotAContainer {
            node_id: parent_id.to_string(),
            kind: parent.kind().to_string(),
        });
    }

    let node = build_node(registry, ids, block_type, props)?;
    let id = node.id().to_string();
    debug!(node_id = %id, parent_id, block_type, index, "Inserting child block");
    Ok(tree.insert_child(parent_id, index, node).map(|tree| (tree, id)))
}

/// Shallow-merge `partial` into the props of `node_id`
pub fn update_props(tree: &Tree, node_id: &str, partial: &Props) -> Option<Tree> {
    let merged = tree.find_node(node_id)?.merged_props(partial)?;
    debug!(node_id, keys = partial.len(), "Updating block props");
    tree.map_node(node_id, |node| node.with_props(merged))
}

/// Remove `node_id` and its subtree
pub fn remove(tree: &Tree, node_id: &str) -> Option<Tree> {
    let removal = tree.filter_out(node_id);
    if !removal.removed {
        return None;
    }
    debug!(node_id, "Removed block");
    Some(removal.tree)
}

/// Copy `node_id` with fresh ids and place the copy right after it
pub fn duplicate(tree: &Tree, ids: &mut IdGenerator, node_id: &str) -> Option<(Tree, NodeId)> {
    let copy = tree.find_node(node_id)?.clone_subtree(ids);
    let copy_id = copy.id().to_string();
    debug!(node_id, copy_id = %copy_id, "Duplicating block");
    tree.insert_after(node_id, copy).map(|tree| (tree, copy_id))
}

/// Swap `node_id` with its neighbour in `direction`
pub fn move_node(tree: &Tree, node_id: &str, direction: Direction) -> Option<Tree> {
    let moved = tree.move_sibling(node_id, direction)?;
    debug!(node_id, ?direction, "Moved block");
    Some(moved)
}
