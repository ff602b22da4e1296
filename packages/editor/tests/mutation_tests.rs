//! Mutations as pure tree functions, without a session

use bricks_editor::{duplicate, insert_at, remove, update_props, Mutation, MutationError};
use bricks_model::{props, IdGenerator, Node, PropValue, Props, Tree};
use bricks_registry::TypeRegistry;
use std::collections::HashSet;

fn page() -> Tree {
    Tree::from_nodes([
        Node::new("nav", "container", Props::new()).with_children([
            Node::new("logo", "image", props([("src", "logo.svg")])),
            Node::new("menu", "columns", Props::new()).with_children([
                Node::new("m1", "button", props([("label", "Docs")])),
                Node::new("m2", "button", props([("label", "Blog")])),
            ]),
        ]),
        Node::new("intro", "text", props([("text", "Hi")])),
    ])
}

#[test]
fn test_remove_of_insert_round_trips() {
    let registry = TypeRegistry::builtin();
    let mut ids = IdGenerator::from_seed("r".to_string());
    let tree = page();

    for index in 0..=tree.len() {
        let (with_node, id) =
            insert_at(&tree, &registry, &mut ids, index, "spacer", &Props::new()).unwrap();
        assert!(!tree.contains(&id));

        let restored = remove(&with_node, &id).unwrap();
        assert_eq!(restored, tree);
    }
}

#[test]
fn test_duplicate_subtree_gets_disjoint_ids() {
    let mut ids = IdGenerator::from_seed("d".to_string());
    let tree = page();
    let existing: HashSet<String> = tree.ids().into_iter().collect();
    let subtree_size = tree.find_node("nav").unwrap().subtree_size();

    let (next, copy) = duplicate(&tree, &mut ids, "nav").unwrap();
    assert_eq!(next.node_count(), tree.node_count() + subtree_size);
    assert_eq!(next.roots()[1].id(), copy);

    let copied = next.find_node(&copy).unwrap();
    let fresh = Tree::from_nodes([copied.clone()]).ids();
    assert_eq!(fresh.len(), subtree_size);
    assert!(fresh.iter().all(|id| !existing.contains(id)));

    // Editing the copy's nested button leaves the original alone
    let copied_m1 = copied.children[1].children[0].id().to_string();
    let edited = update_props(&next, &copied_m1, &props([("label", "Guides")])).unwrap();
    assert_eq!(edited.find_node("m1").unwrap().prop("label"), Some(&PropValue::from("Docs")));
    assert_eq!(
        edited.find_node(&copied_m1).unwrap().prop("label"),
        Some(&PropValue::from("Guides"))
    );
}

#[test]
fn test_update_merges_shallowly() {
    let button = Node::new("b", "button", props([("label", "Go"), ("url", "/a")]));
    let tree = Tree::from_nodes([button]);

    let partial = props([("url", PropValue::from("/b")), ("newTab", PropValue::from(true))]);
    let next = update_props(&tree, "b", &partial).unwrap();
    let node = next.find_node("b").unwrap();
    assert_eq!(node.prop("label"), Some(&PropValue::from("Go")));
    assert_eq!(node.prop("url"), Some(&PropValue::from("/b")));
    assert_eq!(node.prop("newTab"), Some(&PropValue::Bool(true)));
}

#[test]
fn test_declined_mutations_consume_no_ids() {
    let registry = TypeRegistry::builtin();
    let mut ids = IdGenerator::from_seed("x".to_string());
    let tree = page();

    let err = Mutation::InsertInto {
        parent_id: "intro".to_string(),
        index: 0,
        block_type: "text".to_string(),
        props: Props::new(),
    }
    .apply(&tree, &registry, &mut ids)
    .unwrap_err();
    assert_eq!(
        err,
        MutationError::NotAContainer {
            node_id: "intro".to_string(),
            kind: "text".to_string(),
        }
    );

    assert_eq!(ids.new_id(), "x-1");
}

#[test]
fn test_mutation_json_shape() {
    let mutation: Mutation =
        serde_json::from_str(r#"{ "MoveDown": { "node_id": "m1" } }"#).unwrap();
    assert_eq!(mutation, Mutation::MoveDown { node_id: "m1".to_string() });
    assert_eq!(mutation.name(), "Move block down");

    let applied = mutation
        .apply(&page(), &TypeRegistry::builtin(), &mut IdGenerator::from_seed("j".to_string()))
        .unwrap()
        .unwrap();
    let menu: Vec<&str> = applied
        .tree
        .find_node("menu")
        .unwrap()
        .children
        .iter()
        .map(|n| n.id())
        .collect();
    assert_eq!(menu, vec!["m2", "m1"]);
    assert!(applied.created.is_none());
}
