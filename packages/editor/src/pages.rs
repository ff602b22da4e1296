//! # Page Store
//!
//! Ordered collection of the pages of a site. Each page owns one block tree
//! plus its name, visibility and SEO settings.
//!
//! Page-level operations never touch tree history. A store always holds at
//! least one page: deleting the last one is refused.

use bricks_model::{Direction, IdGenerator, PropValue, Tree};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

use crate::errors::EditorError;

pub type PageId = String;

/// Who can see a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Draft,
    Private,
}

/// SEO settings of a page. Unset fields are omitted when saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Anything else the host wants to keep with the page, such as
    /// `"noindex": true`
    #[serde(flatten)]
    pub extra: BTreeMap<String, PropValue>,
}

impl PageSettings {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Shallow merge: fields set in `partial` win. Returns whether anything
    /// changed.
    pub fn merge(&mut self, partial: &PageSettings) -> bool {
        let mut changed = false;
        for (field, value) in [
            (&mut self.title, &partial.title),
            (&mut self.description, &partial.description),
            (&mut self.slug, &partial.slug),
        ] {
            if value.is_some() && field != value {
                *field = value.clone();
                changed = true;
            }
        }
        for (key, value) in &partial.extra {
            if self.extra.get(key) != Some(value) {
                self.extra.insert(key.clone(), value.clone());
                changed = true;
            }
        }
        changed
    }
}

/// One page of the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,

    #[serde(default)]
    pub tree: Tree,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub settings: PageSettings,
}

impl Page {
    pub fn new(id: impl Into<PageId>, name: impl Into<String>, tree: Tree) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tree,
            visibility: Visibility::default(),
            settings: PageSettings::default(),
        }
    }
}

/// Ordered pages of a site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageStore {
    pages: Vec<Page>,
}

impl PageStore {
    /// Build a store from persisted pages, checking id uniqueness
    pub fn from_pages(pages: Vec<Page>) -> Result<Self, EditorError> {
        let mut page_ids = HashSet::new();
        for page in &pages {
            if !page_ids.insert(page.id.as_str()) {
                return Err(EditorError::DuplicatePageId(page.id.clone()));
            }

            check_node_ids(&page.id, &page.tree)?;
        }

        Ok(Self { pages })
    }

    /// A store holding one empty page
    pub(crate) fn starter(name: impl Into<String>, ids: &mut IdGenerator) -> (Self, PageId) {
        let page = Page::new(ids.new_id(), name, Tree::new());
        let id = page.id.clone();
        info!(page_id = %id, name = %page.name, "Created page");
        (Self { pages: vec![page] }, id)
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.name == name)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| page.id == id)
    }

    /// Add a page at the end; returns its id.
    ///
    /// The tree is refused if any node id appears twice in it.
    pub fn create_page(
        &mut self,
        name: impl Into<String>,
        tree: Tree,
        ids: &mut IdGenerator,
    ) -> Result<PageId, EditorError> {
        ids.observe_tree(&tree);
        let page = Page::new(ids.new_id(), name, tree);
        check_node_ids(&page.id, &page.tree)?;

        let id = page.id.clone();
        info!(page_id = %id, name = %page.name, "Created page");
        self.pages.push(page);
        Ok(id)
    }

    pub fn rename_page(&mut self, id: &str, name: impl Into<String>) -> bool {
        let name = name.into();
        match self.get_mut(id) {
            Some(page) if page.name != name => {
                debug!(page_id = %id, from = %page.name, to = %name, "Renamed page");
                page.name = name;
                true
            }
            _ => false,
        }
    }

    /// Remove a page. Refused when it is the only page left.
    pub fn delete_page(&mut self, id: &str) -> bool {
        if self.pages.len() <= 1 {
            debug!(page_id = %id, "Refused to delete the last page");
            return false;
        }
        let Some(index) = self.position(id) else {
            return false;
        };
        let page = self.pages.remove(index);
        info!(page_id = %id, name = %page.name, "Deleted page");
        true
    }

    /// Copy a page with fresh node ids, placed right after the original
    pub fn duplicate_page(
        &mut self,
        id: &str,
        name_suffix: &str,
        ids: &mut IdGenerator,
    ) -> Option<PageId> {
        let index = self.position(id)?;
        let source = &self.pages[index];

        let tree = Tree::from_nodes(source.tree.roots().iter().map(|node| node.clone_subtree(ids)));
        let copy = Page {
            id: ids.new_id(),
            name: format!("{}{}", source.name, name_suffix),
            tree,
            visibility: source.visibility,
            settings: source.settings.clone(),
        };

        let copy_id = copy.id.clone();
        info!(page_id = %id, copy_id = %copy_id, "Duplicated page");
        self.pages.insert(index + 1, copy);
        Some(copy_id)
    }

    /// Swap with the neighbouring page; no-op at either end
    pub fn move_page(&mut self, id: &str, direction: Direction) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.pages.len() => index + 1,
            _ => return false,
        };
        self.pages.swap(index, target);
        true
    }

    pub fn move_page_up(&mut self, id: &str) -> bool {
        self.move_page(id, Direction::Up)
    }

    pub fn move_page_down(&mut self, id: &str) -> bool {
        self.move_page(id, Direction::Down)
    }

    pub fn set_visibility(&mut self, id: &str, visibility: Visibility) -> bool {
        match self.get_mut(id) {
            Some(page) if page.visibility != visibility => {
                page.visibility = visibility;
                true
            }
            _ => false,
        }
    }

    pub fn update_settings(&mut self, id: &str, partial: &PageSettings) -> bool {
        self.get_mut(id)
            .map(|page| page.settings.merge(partial))
            .unwrap_or(false)
    }

    /// Swap in a new tree for a page
    pub(crate) fn set_tree(&mut self, id: &str, tree: Tree) -> bool {
        match self.get_mut(id) {
            Some(page) => {
                page.tree = tree;
                true
            }
            None => false,
        }
    }
}

/// Node ids must be unique within a page tree
fn check_node_ids(page_id: &str, tree: &Tree) -> Result<(), EditorError> {
    let mut seen = HashSet::new();
    match tree.iter().find(|node| !seen.insert(node.id())) {
        Some(node) => Err(EditorError::DuplicateNodeId {
            page_id: page_id.to_string(),
            node_id: node.id().to_string(),
        }),
        None => Ok(()),
    }
}
