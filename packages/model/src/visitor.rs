use crate::node::Node;
use crate::tree::Tree;
use std::collections::BTreeMap;

/// Visitor pattern for traversing page trees immutably
///
/// Default implementations walk the entire tree in pre-order.
/// Override `visit_node` to act on nodes; call `walk_node` from the override
/// to keep descending.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, tree: &Tree) {
        walk_tree(self, tree);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &Tree) {
    for node in tree.roots() {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    for child in &node.children {
        visitor.visit_node(child);
    }
}

/// Counts nodes per type key
#[derive(Debug, Default)]
pub struct KindCounter {
    pub counts: BTreeMap<String, usize>,
}

impl KindCounter {
    pub fn count(tree: &Tree) -> BTreeMap<String, usize> {
        let mut counter = Self::default();
        counter.visit_tree(tree);
        counter.counts
    }
}

impl Visitor for KindCounter {
    fn visit_node(&mut self, node: &Node) {
        *self.counts.entry(node.kind().to_string()).or_default() += 1;
        walk_node(self, node);
    }
}

/// Finds the deepest nesting level (root list is depth 1)
#[derive(Debug, Default)]
pub struct DepthMeter {
    current: usize,
    pub max: usize,
}

impl DepthMeter {
    pub fn measure(tree: &Tree) -> usize {
        let mut meter = Self::default();
        meter.visit_tree(tree);
        meter.max
    }
}

impl Visitor for DepthMeter {
    fn visit_node(&mut self, node: &Node) {
        self.current += 1;
        self.max = self.max.max(self.current);
        walk_node(self, node);
        self.current -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Props;

    fn sample() -> Tree {
        Tree::from_nodes([
            Node::new("a", "text", Props::new()),
            Node::new("b", "container", Props::new()).with_children([
                Node::new("c", "text", Props::new()),
                Node::new("d", "container", Props::new())
                    .with_children([Node::new("e", "button", Props::new())]),
            ]),
        ])
    }

    #[test]
    fn test_kind_counter() {
        let counts = KindCounter::count(&sample());
        assert_eq!(counts.get("text"), Some(&2));
        assert_eq!(counts.get("container"), Some(&2));
        assert_eq!(counts.get("button"), Some(&1));
    }

    #[test]
    fn test_depth_meter() {
        assert_eq!(DepthMeter::measure(&sample()), 3);
        assert_eq!(DepthMeter::measure(&Tree::new()), 0);
    }

    #[test]
    fn test_custom_visitor_order_matches_iter() {
        struct Ids(Vec<String>);
        impl Visitor for Ids {
            fn visit_node(&mut self, node: &Node) {
                self.0.push(node.id().to_string());
                walk_node(self, node);
            }
        }

        let tree = sample();
        let mut ids = Ids(Vec::new());
        ids.visit_tree(&tree);
        assert_eq!(ids.0, tree.ids());
    }
}
