//! # Undo/Redo Stack
//!
//! Linear history of whole-tree snapshots for one page.
//!
//! ## Design
//!
//! - Every change records the tree as it was *before* the change
//! - Undo swaps the current tree for the most recent snapshot and keeps the
//!   current tree on the redo stack
//! - Redo is the mirror image
//! - New changes clear the redo stack
//! - Snapshots share unchanged subtrees with each other, so keeping many of
//!   them is cheap
//! - Supports batches (several changes undone as one step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! stack.record(before.clone(), Some("Insert block".into()));
//! let restored = stack.undo(after.clone());   // Some(before)
//! let again = stack.redo(before);             // Some(after)
//! ```

use bricks_model::Tree;

/// A page tree as it was at one point in time
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tree: Tree,

    /// What the change that replaced this tree did
    pub description: Option<String>,
}

/// Changes being grouped into one undo step
#[derive(Debug)]
struct PendingBatch {
    snapshot: Option<Tree>,
    description: Option<String>,
}

/// Undo/redo history for one page tree
#[derive(Debug)]
pub struct UndoStack {
    /// Past trees (most recent last)
    undo_stack: Vec<Snapshot>,

    /// Undone trees (most recent last)
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<PendingBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the tree as it was before a change
    pub fn record(&mut self, before: Tree, description: Option<String>) {
        if let Some(batch) = self.current_batch.as_mut() {
            // Only the tree from before the first change of the batch matters
            if batch.snapshot.is_none() {
                batch.snapshot = Some(before);
            }
            if batch.description.is_none() {
                batch.description = description;
            }
            self.redo_stack.clear();
            return;
        }

        self.push_snapshot(Snapshot {
            tree: before,
            description,
        });
    }

    /// Start a batch of changes (will be undone/redone together)
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        if self.current_batch.is_some() {
            return;
        }
        self.current_batch = Some(PendingBatch {
            snapshot: None,
            description: Some(description.into()),
        });
    }

    /// End the current batch and push it to the undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if let Some(tree) = batch.snapshot {
                self.push_snapshot(Snapshot {
                    tree,
                    description: batch.description,
                });
            }
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_snapshot(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the future
        self.redo_stack.clear();
    }

    /// Step back: returns the tree to restore, given the current one
    pub fn undo(&mut self, current: Tree) -> Option<Tree> {
        self.end_batch();

        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot {
            tree: current,
            description: snapshot.description.clone(),
        });
        Some(snapshot.tree)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: Tree) -> Option<Tree> {
        self.end_batch();

        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot {
            tree: current,
            description: snapshot.description.clone(),
        });
        Some(snapshot.tree)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
