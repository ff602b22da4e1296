//! # Edit Session
//!
//! The state a host holds while a user edits a site: the pages, which page is
//! active, one undo history per page and the current selection.
//!
//! Every verb runs to completion before it returns. A verb that changes the
//! active tree records the tree from before the change, swaps in the new one
//! and reconciles the selection. A verb that changes nothing leaves history
//! alone.

use bricks_model::{Direction, IdGenerator, Node, NodeId, Props, Tree};
use bricks_registry::TypeRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::mutations::{self, Applied, Mutation};
use crate::pages::{Page, PageId, PageSettings, PageStore, Visibility};
use crate::selection::Selection;
use crate::undo_stack::UndoStack;

static EMPTY_TREE: Tree = Tree::new();

/// Outcome of [`EditSession::apply`]
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Session version after the mutation
    pub version: u64,

    /// Whether the active tree changed
    pub changed: bool,

    /// Block created by an insert or duplicate
    pub created: Option<NodeId>,
}

/// One user's editing session over a set of pages
#[derive(Debug)]
pub struct EditSession {
    id: String,
    registry: Arc<TypeRegistry>,
    config: EditorConfig,
    ids: IdGenerator,
    pages: PageStore,
    active: PageId,
    histories: HashMap<PageId, UndoStack>,
    selection: Selection,

    /// Increments on every change
    version: u64,
}

impl EditSession {
    /// Start a session with a single empty page
    pub fn new(id: impl Into<String>, registry: Arc<TypeRegistry>, config: EditorConfig) -> Self {
        let id = id.into();
        let mut ids = id_generator(&id, &config);
        let (pages, active) = PageStore::starter(config.default_page_name.clone(), &mut ids);

        info!(session = %id, page_id = %active, "Started edit session");

        Self {
            id,
            registry,
            config,
            ids,
            pages,
            active,
            histories: HashMap::new(),
            selection: Selection::default(),
            version: 0,
        }
    }

    /// Rebuild a session from persisted pages. The first page becomes active.
    pub fn load(
        id: impl Into<String>,
        registry: Arc<TypeRegistry>,
        config: EditorConfig,
        pages: Vec<Page>,
    ) -> Result<Self, EditorError> {
        let Some(active) = pages.first().map(|page| page.id.clone()) else {
            return Ok(Self::new(id, registry, config));
        };

        let id = id.into();
        let pages = PageStore::from_pages(pages)?;
        let mut ids = id_generator(&id, &config);
        for page in pages.pages() {
            ids.observe(&page.id);
            ids.observe_tree(&page.tree);
        }

        info!(session = %id, pages = pages.len(), "Loaded edit session");

        Ok(Self {
            id,
            registry,
            config,
            ids,
            pages,
            active,
            histories: HashMap::new(),
            selection: Selection::default(),
            version: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn pages(&self) -> &PageStore {
        &self.pages
    }

    /// Hand the pages back for saving
    pub fn into_pages(self) -> Vec<Page> {
        self.pages.into_pages()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn active_page_id(&self) -> &str {
        &self.active
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.pages.get(&self.active)
    }

    /// Tree of the active page
    pub fn tree(&self) -> &Tree {
        self.active_page().map(|page| &page.tree).unwrap_or(&EMPTY_TREE)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append a new block to the root list; returns its id
    pub fn insert_at_root(
        &mut self,
        block_type: &str,
        props: Props,
    ) -> Result<NodeId, EditorError> {
        let index = self.tree().len();
        self.insert_at(index, block_type, props)
    }

    /// Insert a new block into the root list at `index`
    pub fn insert_at(
        &mut self,
        index: usize,
        block_type: &str,
        props: Props,
    ) -> Result<NodeId, EditorError> {
        let tree = self.tree().clone();
        let (next, id) = mutations::insert_at(
            &tree,
            &self.registry,
            &mut self.ids,
            index,
            block_type,
            &props,
        )?;
        self.commit(next, "Insert block");
        Ok(id)
    }

    /// Insert a new block as a child of a container block.
    ///
    /// `Ok(None)` when the parent is gone.
    pub fn insert_into(
        &mut self,
        parent_id: &str,
        index: usize,
        block_type: &str,
        props: Props,
    ) -> Result<Option<NodeId>, EditorError> {
        let tree = self.tree().clone();
        let inserted = mutations::insert_into(
            &tree,
            &self.registry,
            &mut self.ids,
            parent_id,
            index,
            block_type,
            &props,
        )?;

        Ok(inserted.map(|(next, id)| {
            self.commit(next, "Insert child block");
            id
        }))
    }

    pub fn update_props(&mut self, node_id: &str, partial: Props) -> bool {
        let next = mutations::update_props(self.tree(), node_id, &partial);
        self.commit_if_changed(next, "Update block")
    }

    pub fn remove(&mut self, node_id: &str) -> bool {
        let next = mutations::remove(self.tree(), node_id);
        self.commit_if_changed(next, "Remove block")
    }

    /// Copy a block next to itself; returns the copy's id
    pub fn duplicate(&mut self, node_id: &str) -> Option<NodeId> {
        let tree = self.tree().clone();
        let (next, id) = mutations::duplicate(&tree, &mut self.ids, node_id)?;
        self.commit(next, "Duplicate block");
        Some(id)
    }

    pub fn move_up(&mut self, node_id: &str) -> bool {
        let next = mutations::move_node(self.tree(), node_id, Direction::Up);
        self.commit_if_changed(next, "Move block up")
    }

    pub fn move_down(&mut self, node_id: &str) -> bool {
        let next = mutations::move_node(self.tree(), node_id, Direction::Down);
        self.commit_if_changed(next, "Move block down")
    }

    /// Merge `f(node)` into the props of every block, as one undo step
    pub fn apply_bulk_transform<F>(&mut self, f: F) -> bool
    where
        F: FnMut(&Node) -> Props,
    {
        let next = self.tree().map_all(f);
        self.commit_if_changed(next, "Update all blocks")
    }

    /// Apply a serialised mutation to the active page
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        let tree = self.tree().clone();
        let applied = mutation.apply(&tree, &self.registry, &mut self.ids)?;

        let created = match applied {
            Some(Applied { tree, created }) => {
                self.commit(tree, mutation.name());
                Some(created)
            }
            None => {
                debug!(mutation = mutation.name(), "Mutation changed nothing");
                None
            }
        };

        Ok(MutationResult {
            version: self.version,
            changed: created.is_some(),
            created: created.flatten(),
        })
    }

    fn commit_if_changed(&mut self, next: Option<Tree>, description: &str) -> bool {
        match next {
            Some(tree) => {
                self.commit(tree, description);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, next: Tree, description: &str) {
        let before = self.tree().clone();
        self.history_mut().record(before.clone(), Some(description.to_string()));
        self.swap_tree(before, next);
        debug!(page_id = %self.active, version = self.version, description, "Committed change");
    }

    fn swap_tree(&mut self, before: Tree, after: Tree) {
        self.selection.reconcile(&before, &after);
        self.pages.set_tree(&self.active, after);
        self.version += 1;
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let current = self.tree().clone();
        let Some(restored) = self.history_mut().undo(current.clone()) else {
            return false;
        };
        debug!(page_id = %self.active, "Undo");
        self.swap_tree(current, restored);
        true
    }

    pub fn redo(&mut self) -> bool {
        let current = self.tree().clone();
        let Some(restored) = self.history_mut().redo(current.clone()) else {
            return false;
        };
        debug!(page_id = %self.active, "Redo");
        self.swap_tree(current, restored);
        true
    }

    /// Run `f` so that every change it makes is undone as one step
    pub fn batch<T>(&mut self, description: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let nested = self.history_mut().is_batching();
        if !nested {
            self.history_mut().begin_batch(description);
        }

        let result = f(self);

        if !nested {
            for history in self.histories.values_mut() {
                history.end_batch();
            }
        }
        result
    }

    /// History of the active page, if it was ever edited
    pub fn history(&self) -> Option<&UndoStack> {
        self.histories.get(&self.active)
    }

    pub fn can_undo(&self) -> bool {
        self.history().is_some_and(UndoStack::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history().is_some_and(UndoStack::can_redo)
    }

    pub fn undo_levels(&self) -> usize {
        self.history().map_or(0, UndoStack::undo_levels)
    }

    pub fn redo_levels(&self) -> usize {
        self.history().map_or(0, UndoStack::redo_levels)
    }

    fn history_mut(&mut self) -> &mut UndoStack {
        let limit = self.config.history_limit;
        self.histories
            .entry(self.active.clone())
            .or_insert_with(|| UndoStack::with_max_levels(limit))
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select(&mut self, node_id: impl Into<NodeId>) {
        self.selection.select(node_id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected_id()
    }

    /// Selected block in the active tree; `None` if nothing is selected or
    /// the id is stale
    pub fn selected_node(&self) -> Option<&Node> {
        self.selection.resolve(self.tree())
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    /// Add a page at the end. The active page does not change.
    ///
    /// Fails when a node id appears twice in `tree`.
    pub fn add_page(&mut self, name: impl Into<String>, tree: Tree) -> Result<PageId, EditorError> {
        let id = self.pages.create_page(name, tree, &mut self.ids)?;
        self.version += 1;
        Ok(id)
    }

    pub fn switch_page(&mut self, page_id: &str) -> Result<(), EditorError> {
        if self.pages.get(page_id).is_none() {
            return Err(EditorError::UnknownPage(page_id.to_string()));
        }
        if self.active != page_id {
            info!(from = %self.active, to = %page_id, "Switched page");
            self.active = page_id.to_string();
            self.selection.clear();
        }
        Ok(())
    }

    pub fn rename_page(&mut self, page_id: &str, name: impl Into<String>) -> bool {
        self.track(|session| session.pages.rename_page(page_id, name))
    }

    /// Delete a page and its history. Refused for the only page.
    ///
    /// Deleting the active page activates the page that took its place, or
    /// the new last page.
    pub fn delete_page(&mut self, page_id: &str) -> bool {
        let Some(index) = self.pages.position(page_id) else {
            return false;
        };
        if !self.pages.delete_page(page_id) {
            return false;
        }

        self.histories.remove(page_id);
        if self.active == page_id {
            let index = index.min(self.pages.len().saturating_sub(1));
            if let Some(page) = self.pages.pages().get(index) {
                self.active = page.id.clone();
            }
            self.selection.clear();
        }
        self.version += 1;
        true
    }

    /// Copy a page with fresh ids; returns the copy's id
    pub fn duplicate_page(&mut self, page_id: &str) -> Option<PageId> {
        let id = self
            .pages
            .duplicate_page(page_id, &self.config.duplicate_suffix, &mut self.ids)?;
        self.version += 1;
        Some(id)
    }

    pub fn move_page_up(&mut self, page_id: &str) -> bool {
        self.track(|session| session.pages.move_page_up(page_id))
    }

    pub fn move_page_down(&mut self, page_id: &str) -> bool {
        self.track(|session| session.pages.move_page_down(page_id))
    }

    pub fn set_visibility(&mut self, page_id: &str, visibility: Visibility) -> bool {
        self.track(|session| session.pages.set_visibility(page_id, visibility))
    }

    pub fn update_settings(&mut self, page_id: &str, partial: &PageSettings) -> bool {
        self.track(|session| session.pages.update_settings(page_id, partial))
    }

    fn track(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        let changed = f(self);
        if changed {
            self.version += 1;
        }
        changed
    }
}

fn id_generator(session_id: &str, config: &EditorConfig) -> IdGenerator {
    match &config.id_seed {
        Some(seed) => IdGenerator::from_seed(seed.clone()),
        None => IdGenerator::new(session_id),
    }
}
