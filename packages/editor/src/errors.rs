//! Error types for the editor

use bricks_model::NodeId;
use thiserror::Error;

use crate::pages::PageId;

/// Declined mutation: the request itself is invalid
///
/// A mutation aimed at a node that no longer exists is not an error; it is
/// reported as "nothing changed" instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Unknown block type: {0}")]
    UnknownType(String),

    #[error("Block {node_id} of type {kind} cannot hold children")]
    NotAContainer { node_id: NodeId, kind: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("No page with id {0}")]
    UnknownPage(PageId),

    #[error("Page id used twice: {0}")]
    DuplicatePageId(PageId),

    #[error("Node id {node_id} appears twice in page {page_id}")]
    DuplicateNodeId { page_id: PageId, node_id: NodeId },
}
