//! # Nodes
//!
//! A node is one block of a page: an id, a type key into the block registry,
//! a flat props record and an ordered list of children.
//!
//! Children are held behind `Arc` so that tree snapshots share every subtree
//! an edit did not touch. Nodes are never mutated in place once they are part
//! of a tree; edits build new nodes along the path to the change.

use crate::id_generator::IdGenerator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Opaque node identifier, unique within a tree
pub type NodeId = String;

/// Key/value configuration of a node
pub type Props = BTreeMap<String, PropValue>;

/// A single prop value (JSON scalar)
///
/// Whole JSON numbers load as `Int` and keep their exact value; anything
/// with a fraction or exponent loads as `Number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Int(i64),
    Number(f64),
    Text(String),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value; integers widen to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Int(n) => Some(*n as f64),
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => write!(f, "null"),
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Int(n) => write!(f, "{}", n),
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(i64::from(value))
    }
}

/// Build a props record from key/value pairs
///
/// ```
/// use bricks_model::{props, PropValue};
///
/// let p = props([("text", "Hello"), ("align", "center")]);
/// assert_eq!(p.get("text"), Some(&PropValue::from("Hello")));
/// ```
pub fn props<K, V, I>(pairs: I) -> Props
where
    K: Into<String>,
    V: Into<PropValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// One block in a page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: NodeId,

    #[serde(rename = "type")]
    pub(crate) kind: String,

    #[serde(default)]
    pub props: Props,

    /// Ordered children; absent and empty are the same thing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Arc<Node>>,
}

impl Node {
    /// Create a leaf node
    pub fn new(id: impl Into<NodeId>, kind: impl Into<String>, props: Props) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props,
            children: Vec::new(),
        }
    }

    /// Attach children (replaces any existing ones)
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Registry type key of this node
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.subtree_size())
            .sum::<usize>()
    }

    /// Shallow-merge `partial` over the current props.
    ///
    /// Returns `None` when every key in `partial` already holds the same
    /// value, so callers can tell a real change from a no-op.
    pub fn merged_props(&self, partial: &Props) -> Option<Props> {
        let unchanged = partial
            .iter()
            .all(|(key, value)| self.props.get(key) == Some(value));
        if unchanged {
            return None;
        }

        let mut merged = self.props.clone();
        merged.extend(partial.iter().map(|(k, v)| (k.clone(), v.clone())));
        Some(merged)
    }

    /// Copy of this node with `props` replaced, same id and children
    pub fn with_props(&self, props: Props) -> Node {
        Node {
            id: self.id.clone(),
            kind: self.kind.clone(),
            props,
            children: self.children.clone(),
        }
    }

    /// Deep copy of the subtree where every node gets a fresh id.
    ///
    /// The copy shares nothing with the original, so edits to one never show
    /// up in the other.
    pub fn clone_subtree(&self, ids: &mut IdGenerator) -> Node {
        Node {
            id: ids.new_id(),
            kind: self.kind.clone(),
            props: self.props.clone(),
            children: self
                .children
                .iter()
                .map(|child| Arc::new(child.clone_subtree(ids)))
                .collect(),
        }
    }
}
