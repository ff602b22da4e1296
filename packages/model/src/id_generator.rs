use crate::node::NodeId;
use crate::tree::Tree;
use crc32fast::Hasher;

/// Derive an id seed from a session name using CRC32
pub fn session_seed(name: &str) -> String {
    let mut buff = String::from(name);
    if !name.starts_with("bricks://") {
        buff = format!("bricks://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for nodes and pages within a session
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(session_name: &str) -> Self {
        Self {
            seed: session_seed(session_name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> NodeId {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Advance past an id that already exists, if it carries our seed.
    ///
    /// Ids loaded from storage may have been produced by an earlier session
    /// with the same seed; without this a fresh id could collide with them.
    pub fn observe(&mut self, id: &str) {
        let sequence = id
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|n| n.parse::<u64>().ok());

        if let Some(n) = sequence {
            self.count = self.count.max(n);
        }
    }

    /// Observe every id in a tree
    pub fn observe_tree(&mut self, tree: &Tree) {
        for node in tree.iter() {
            self.observe(node.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, Props};

    #[test]
    fn test_session_seed_is_stable() {
        let a = session_seed("landing");
        let b = session_seed("landing");
        assert_eq!(a, b);
        assert_eq!(session_seed("bricks://landing"), a);
        assert_ne!(a, session_seed("pricing"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("landing");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(gen.seed()));
    }

    #[test]
    fn test_observe_skips_loaded_ids() {
        let mut gen = IdGenerator::from_seed("s".to_string());
        let tree = Tree::from_nodes([
            Node::new("s-7", "title", Props::new()),
            Node::new("other-99", "text", Props::new()),
            Node::new("s-x", "text", Props::new()),
        ]);

        gen.observe_tree(&tree);

        assert_eq!(gen.new_id(), "s-8");
    }

    #[test]
    fn test_observe_never_moves_backwards() {
        let mut gen = IdGenerator::from_seed("s".to_string());
        gen.new_id();
        gen.new_id();
        gen.observe("s-1");
        assert_eq!(gen.new_id(), "s-3");
    }
}
