//! # Page Trees
//!
//! A tree is the ordered root list of a page. There is no synthetic root
//! node; the top level is itself a list of siblings.
//!
//! Every operation here is copy-on-write: it reads `&self` and hands back a
//! new tree. Only the nodes on the path from the root list to the edited list
//! are rebuilt; every other subtree is shared with the input through `Arc`.
//!
//! Operations that target an id which is not in the tree return `None`
//! instead of an error. Callers keep the tree they already have.

use crate::node::{Node, NodeId, Props};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Direction for sibling reordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Result of [`Tree::filter_out`]
#[derive(Debug, Clone)]
pub struct Removal {
    pub tree: Tree,
    /// Whether a node was actually removed
    pub removed: bool,
}

/// Ordered root list of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    roots: Vec<Arc<Node>>,
}

/// Outcome of rewriting the sibling list that holds a target id
enum Rewrite {
    NotFound,
    Unchanged,
    Changed(Vec<Arc<Node>>),
}

impl Tree {
    pub const fn new() -> Self {
        Self { roots: Vec::new() }
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            roots: nodes.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    /// Number of root-level nodes
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order iterator: root list order, then children order
    pub fn iter(&self) -> DepthFirst<'_> {
        DepthFirst::new(self)
    }

    /// Total number of nodes at every depth
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|n| n.subtree_size()).sum()
    }

    /// Every id in pre-order
    pub fn ids(&self) -> Vec<NodeId> {
        self.iter().map(|node| node.id().to_string()).collect()
    }

    /// Depth-first lookup; first match wins
    #[instrument(level = "trace", skip(self))]
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.iter().find(|node| node.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_node(id).is_some()
    }

    /// Ancestors of `id`, outermost first. Empty for a root-level node.
    pub fn path_to(&self, id: &str) -> Option<Vec<&Node>> {
        fn search<'a>(list: &'a [Arc<Node>], id: &str, path: &mut Vec<&'a Node>) -> bool {
            for node in list {
                if node.id() == id {
                    return true;
                }
                path.push(node);
                if search(&node.children, id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        search(&self.roots, id, &mut path).then_some(path)
    }

    /// Direct parent of `id`; `None` for root-level or missing nodes
    pub fn parent_of(&self, id: &str) -> Option<&Node> {
        self.path_to(id)?.pop()
    }

    /// Replace the node matching `id` with `f(node)`.
    ///
    /// `f` must keep the node's id. Returns `None` when `id` is absent.
    #[instrument(level = "trace", skip(self, f))]
    pub fn map_node<F>(&self, id: &str, f: F) -> Option<Tree>
    where
        F: FnOnce(&Node) -> Node,
    {
        let mut f = Some(f);
        self.rewrite(id, |list, index| match f.take() {
            Some(f) => {
                let next = f(&list[index]);
                list[index] = Arc::new(next);
                true
            }
            None => false,
        })
    }

    /// Remove the node matching `id` together with its whole subtree
    #[instrument(level = "trace", skip(self))]
    pub fn filter_out(&self, id: &str) -> Removal {
        match self.rewrite(id, |list, index| {
            list.remove(index);
            true
        }) {
            Some(tree) => Removal {
                tree,
                removed: true,
            },
            None => Removal {
                tree: self.clone(),
                removed: false,
            },
        }
    }

    /// Swap the node with its neighbour in `direction` within its own list.
    ///
    /// Returns `None` when `id` is absent or already at that end of the list.
    #[instrument(level = "trace", skip(self))]
    pub fn move_sibling(&self, id: &str, direction: Direction) -> Option<Tree> {
        self.rewrite(id, |list, index| match direction {
            Direction::Up if index > 0 => {
                list.swap(index, index - 1);
                true
            }
            Direction::Down if index + 1 < list.len() => {
                list.swap(index, index + 1);
                true
            }
            _ => false,
        })
    }

    /// Insert into the root list; `index` past the end appends
    pub fn insert_at(&self, index: usize, node: Node) -> Tree {
        let mut roots = self.roots.clone();
        let index = index.min(roots.len());
        roots.insert(index, Arc::new(node));
        Tree { roots }
    }

    /// Append to the root list
    pub fn push(&self, node: Node) -> Tree {
        self.insert_at(self.roots.len(), node)
    }

    /// Insert `node` right after `sibling_id`, in the same list
    pub fn insert_after(&self, sibling_id: &str, node: Node) -> Option<Tree> {
        let mut node = Some(node);
        self.rewrite(sibling_id, |list, index| match node.take() {
            Some(node) => {
                list.insert(index + 1, Arc::new(node));
                true
            }
            None => false,
        })
    }

    /// Insert `node` among the children of `parent_id`; `index` is clamped
    pub fn insert_child(&self, parent_id: &str, index: usize, node: Node) -> Option<Tree> {
        self.map_node(parent_id, |parent| {
            let mut next = parent.clone();
            let index = index.min(next.children.len());
            next.children.insert(index, Arc::new(node));
            next
        })
    }

    /// Merge `f(node)` into the props of every node in the tree.
    ///
    /// `f` sees each node once, in pre-order, with its original props.
    /// Returns `None` if no node's props changed.
    #[instrument(level = "trace", skip(self, f))]
    pub fn map_all<F>(&self, mut f: F) -> Option<Tree>
    where
        F: FnMut(&Node) -> Props,
    {
        map_list(&self.roots, &mut f).map(|roots| Tree { roots })
    }

    fn rewrite<E>(&self, id: &str, mut edit: E) -> Option<Tree>
    where
        E: FnMut(&mut Vec<Arc<Node>>, usize) -> bool,
    {
        match rewrite_list(&self.roots, id, &mut edit) {
            Rewrite::Changed(roots) => Some(Tree { roots }),
            Rewrite::NotFound | Rewrite::Unchanged => None,
        }
    }
}

/// Find the list holding `id`, apply `edit` to a copy of it and rebuild the
/// ancestors above it. Unrelated siblings keep their `Arc`s.
fn rewrite_list<E>(list: &[Arc<Node>], id: &str, edit: &mut E) -> Rewrite
where
    E: FnMut(&mut Vec<Arc<Node>>, usize) -> bool,
{
    if let Some(index) = list.iter().position(|node| node.id() == id) {
        let mut next = list.to_vec();
        return if edit(&mut next, index) {
            Rewrite::Changed(next)
        } else {
            Rewrite::Unchanged
        };
    }

    for (index, node) in list.iter().enumerate() {
        match rewrite_list(&node.children, id, edit) {
            Rewrite::NotFound => continue,
            Rewrite::Unchanged => return Rewrite::Unchanged,
            Rewrite::Changed(children) => {
                let parent = Node {
                    id: node.id.clone(),
                    kind: node.kind.clone(),
                    props: node.props.clone(),
                    children,
                };
                let mut next = list.to_vec();
                next[index] = Arc::new(parent);
                return Rewrite::Changed(next);
            }
        }
    }

    Rewrite::NotFound
}

fn map_list<F>(list: &[Arc<Node>], f: &mut F) -> Option<Vec<Arc<Node>>>
where
    F: FnMut(&Node) -> Props,
{
    let mut changed = false;
    let mut next = Vec::with_capacity(list.len());

    for node in list {
        let props = node.merged_props(&f(node));
        let children = map_list(&node.children, f);

        if props.is_none() && children.is_none() {
            next.push(Arc::clone(node));
            continue;
        }

        changed = true;
        next.push(Arc::new(Node {
            id: node.id.clone(),
            kind: node.kind.clone(),
            props: props.unwrap_or_else(|| node.props.clone()),
            children: children.unwrap_or_else(|| node.children.clone()),
        }));
    }

    changed.then_some(next)
}

/// Pre-order traversal over every node of a tree
pub struct DepthFirst<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> DepthFirst<'a> {
    fn new(tree: &'a Tree) -> Self {
        Self {
            stack: tree.roots.iter().rev().map(|n| &**n).collect(),
        }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the leftmost child is visited first
        self.stack
            .extend(node.children.iter().rev().map(|child| &**child));
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Node;
    type IntoIter = DepthFirst<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{props, PropValue};

    fn sample() -> Tree {
        Tree::from_nodes([
            Node::new("a", "title", props([("text", "A")])),
            Node::new("b", "container", Props::new()).with_children([
                Node::new("b1", "text", props([("text", "B1")])),
                Node::new("b2", "container", Props::new())
                    .with_children([Node::new("b2x", "button", props([("label", "Go")]))]),
                Node::new("b3", "image", Props::new()),
            ]),
            Node::new("c", "divider", Props::new()),
        ])
    }

    fn root_ids(tree: &Tree) -> Vec<&str> {
        tree.roots().iter().map(|n| n.id()).collect()
    }

    #[test]
    fn test_iter_is_preorder() {
        let tree = sample();
        assert_eq!(tree.ids(), vec!["a", "b", "b1", "b2", "b2x", "b3", "c"]);
        assert_eq!(tree.node_count(), 7);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_find_node_nested() {
        let tree = sample();
        assert_eq!(tree.find_node("b2x").map(|n| n.kind()), Some("button"));
        assert!(tree.find_node("missing").is_none());
    }

    #[test]
    fn test_path_to() {
        let tree = sample();
        let path: Vec<&str> = tree.path_to("b2x").unwrap().iter().map(|n| n.id()).collect();
        assert_eq!(path, vec!["b", "b2"]);
        assert!(tree.path_to("a").unwrap().is_empty());
        assert!(tree.path_to("zzz").is_none());

        assert_eq!(tree.parent_of("b2x").map(|n| n.id()), Some("b2"));
        assert!(tree.parent_of("a").is_none());
    }

    #[test]
    fn test_map_node_shares_untouched_subtrees() {
        let tree = sample();
        let next = tree
            .map_node("b1", |n| n.with_props(props([("text", "changed")])))
            .unwrap();

        assert_eq!(
            next.find_node("b1").unwrap().prop("text"),
            Some(&PropValue::from("changed"))
        );
        // Original untouched
        assert_eq!(
            tree.find_node("b1").unwrap().prop("text"),
            Some(&PropValue::from("B1"))
        );
        // Siblings off the path are the same allocation
        assert!(Arc::ptr_eq(&tree.roots()[0], &next.roots()[0]));
        assert!(Arc::ptr_eq(&tree.roots()[2], &next.roots()[2]));
        assert!(Arc::ptr_eq(
            &tree.roots()[1].children[1],
            &next.roots()[1].children[1]
        ));
        // The ancestor was rebuilt
        assert!(!Arc::ptr_eq(&tree.roots()[1], &next.roots()[1]));
    }

    #[test]
    fn test_map_node_missing_id() {
        assert!(sample().map_node("nope", |n| n.clone()).is_none());
    }

    #[test]
    fn test_filter_out_cascades() {
        let tree = sample();
        let removal = tree.filter_out("b2");

        assert!(removal.removed);
        assert!(!removal.tree.contains("b2"));
        assert!(!removal.tree.contains("b2x"));
        assert_eq!(removal.tree.node_count(), 5);

        let missing = tree.filter_out("nope");
        assert!(!missing.removed);
        assert_eq!(missing.tree, tree);
    }

    #[test]
    fn test_filter_out_root() {
        let removal = sample().filter_out("a");
        assert_eq!(root_ids(&removal.tree), vec!["b", "c"]);
    }

    #[test]
    fn test_move_sibling_within_nested_list() {
        let tree = sample();
        let next = tree.move_sibling("b3", Direction::Up).unwrap();
        let kids: Vec<&str> = next.roots()[1].children.iter().map(|n| n.id()).collect();
        assert_eq!(kids, vec!["b1", "b3", "b2"]);
    }

    #[test]
    fn test_move_sibling_boundaries_are_noops() {
        let tree = sample();
        assert!(tree.move_sibling("a", Direction::Up).is_none());
        assert!(tree.move_sibling("c", Direction::Down).is_none());
        assert!(tree.move_sibling("b2x", Direction::Down).is_none());
        assert!(tree.move_sibling("nope", Direction::Down).is_none());

        let next = tree.move_sibling("a", Direction::Down).unwrap();
        assert_eq!(root_ids(&next), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_insert_at_clamps() {
        let tree = sample();
        let next = tree.insert_at(99, Node::new("z", "spacer", Props::new()));
        assert_eq!(root_ids(&next), vec!["a", "b", "c", "z"]);

        let next = tree.insert_at(1, Node::new("z", "spacer", Props::new()));
        assert_eq!(root_ids(&next), vec!["a", "z", "b", "c"]);
    }

    #[test]
    fn test_insert_after_and_child() {
        let tree = sample();
        let next = tree
            .insert_after("b1", Node::new("n", "text", Props::new()))
            .unwrap();
        let kids: Vec<&str> = next.roots()[1].children.iter().map(|n| n.id()).collect();
        assert_eq!(kids, vec!["b1", "n", "b2", "b3"]);

        let next = tree
            .insert_child("b2", 0, Node::new("n", "text", Props::new()))
            .unwrap();
        assert_eq!(next.path_to("n").unwrap().len(), 2);
        assert!(tree.insert_child("nope", 0, Node::new("n", "text", Props::new())).is_none());
    }

    #[test]
    fn test_map_all_reports_changes() {
        let tree = sample();

        assert!(tree.map_all(|_| Props::new()).is_none());

        let next = tree
            .map_all(|n| match n.kind() {
                "button" => props([("color", "#ff0000")]),
                _ => Props::new(),
            })
            .unwrap();
        assert_eq!(
            next.find_node("b2x").unwrap().prop("color"),
            Some(&PropValue::from("#ff0000"))
        );
        assert!(Arc::ptr_eq(&tree.roots()[0], &next.roots()[0]));

        let mut seen = Vec::new();
        tree.map_all(|n| {
            seen.push(n.id().to_string());
            Props::new()
        });
        assert_eq!(seen, tree.ids());
    }

    #[test]
    fn test_tree_serializes_as_list() {
        let tree = Tree::from_nodes([Node::new("a", "title", Props::new())]);
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.starts_with('['));

        let back: Tree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
