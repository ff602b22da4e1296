//! # Bricks Model
//!
//! Data model of a page document: nodes ("bricks"), their props, and the
//! ordered root list that makes up a page tree.
//!
//! All tree operations are pure. They take a tree by reference and return a
//! new one, sharing every subtree the edit did not touch:
//!
//! ```
//! use bricks_model::{props, Direction, Node, Tree};
//!
//! let tree = Tree::from_nodes([
//!     Node::new("n1", "title", props([("text", "A")])),
//!     Node::new("n2", "text", props([("text", "B")])),
//! ]);
//!
//! let moved = tree.move_sibling("n2", Direction::Up).unwrap();
//! assert_eq!(moved.ids(), vec!["n2", "n1"]);
//! assert_eq!(tree.ids(), vec!["n1", "n2"]);
//! ```

mod id_generator;
mod node;
mod tree;
mod visitor;

pub use id_generator::{session_seed, IdGenerator};
pub use node::{props, Node, NodeId, PropValue, Props};
pub use tree::{DepthFirst, Direction, Removal, Tree};
pub use visitor::{walk_node, walk_tree, DepthMeter, KindCounter, Visitor};
