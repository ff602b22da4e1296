//! # Bricks Editor
//!
//! Editing engine for block-based pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ registry: block types + inspector schemas   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Mutations over the active page tree      │
//! │  - Undo/redo history per page               │
//! │  - Selection kept in sync with the tree     │
//! │  - Page store (create, reorder, settings)   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: renders trees, persists pages         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: every change produces a new tree, the old one
//!    stays valid and becomes the undo snapshot
//! 2. **Stale ids are not errors**: an edit aimed at a block that is gone
//!    changes nothing and records nothing
//! 3. **No hidden state**: the host owns the session and passes it around
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use bricks_editor::{EditSession, EditorConfig};
//! use bricks_model::props;
//! use bricks_registry::TypeRegistry;
//!
//! let registry = Arc::new(TypeRegistry::builtin());
//! let mut session = EditSession::new("landing", registry, EditorConfig::default());
//!
//! let title = session.insert_at_root("title", props([("text", "Hello")])).unwrap();
//! session.select(title.clone());
//! session.remove(&title);
//! assert!(session.selected_id().is_none());
//!
//! session.undo();
//! assert!(session.tree().contains(&title));
//! ```

mod config;
mod errors;
mod mutations;
mod pages;
mod selection;
mod session;
mod undo_stack;

pub use config::EditorConfig;
pub use errors::{EditorError, MutationError};
pub use mutations::{
    build_node, duplicate, insert_at, insert_into, move_node, remove, update_props, Applied,
    Mutation,
};
pub use pages::{Page, PageId, PageSettings, PageStore, Visibility};
pub use selection::Selection;
pub use session::{EditSession, MutationResult};
pub use undo_stack::{Snapshot, UndoStack};
