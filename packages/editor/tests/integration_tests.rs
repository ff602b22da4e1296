//! Integration tests for the editor crate: pages, histories and persistence

use bricks_editor::{
    EditSession, EditorConfig, EditorError, Mutation, Page, PageSettings, Visibility,
};
use bricks_model::{props, Node, Props, Tree};
use bricks_registry::TypeRegistry;
use std::sync::Arc;

fn registry() -> Arc<TypeRegistry> {
    Arc::new(TypeRegistry::builtin())
}

fn session() -> EditSession {
    let config = EditorConfig {
        id_seed: Some("s".to_string()),
        ..EditorConfig::default()
    };
    EditSession::new("site", registry(), config)
}

fn page_names(session: &EditSession) -> Vec<&str> {
    session.pages().pages().iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_deleting_sole_page_is_rejected() {
    let mut session = session();
    let home = session.active_page_id().to_string();

    assert!(!session.delete_page(&home));
    assert_eq!(session.pages().len(), 1);
}

#[test]
fn test_history_is_kept_per_page() {
    let mut session = session();
    let home = session.active_page_id().to_string();
    session.insert_at_root("title", props([("text", "Home")])).unwrap();

    let about = session.add_page("About", Tree::new()).unwrap();
    session.switch_page(&about).unwrap();
    assert!(!session.can_undo());
    session.insert_at_root("text", Props::new()).unwrap();
    session.insert_at_root("text", Props::new()).unwrap();
    assert_eq!(session.undo_levels(), 2);

    session.switch_page(&home).unwrap();
    assert_eq!(session.undo_levels(), 1);
    assert!(session.undo());
    assert!(session.tree().is_empty());

    // The other page was not touched by that undo
    session.switch_page(&about).unwrap();
    assert_eq!(session.tree().len(), 2);
    assert_eq!(session.undo_levels(), 2);
}

#[test]
fn test_switching_page_clears_selection() {
    let mut session = session();
    let id = session.insert_at_root("button", Props::new()).unwrap();
    session.select(id);

    let other = session.add_page("Pricing", Tree::new()).unwrap();
    session.switch_page(&other).unwrap();
    assert_eq!(session.selected_id(), None);
}

#[test]
fn test_deleting_active_page_activates_neighbour() {
    let mut session = session();
    let home = session.active_page_id().to_string();
    let about = session.add_page("About", Tree::new()).unwrap();
    let contact = session.add_page("Contact", Tree::new()).unwrap();

    session.switch_page(&about).unwrap();
    assert!(session.delete_page(&about));
    assert_eq!(session.active_page_id(), contact);

    assert!(session.delete_page(&contact));
    assert_eq!(session.active_page_id(), home);
    assert_eq!(page_names(&session), vec!["Home"]);
}

#[test]
fn test_page_operations_do_not_touch_tree_history() {
    let mut session = session();
    let home = session.active_page_id().to_string();
    session.insert_at_root("title", Props::new()).unwrap();

    assert!(session.rename_page(&home, "Start"));
    assert!(session.set_visibility(&home, Visibility::Public));
    assert!(session.update_settings(&home, &PageSettings::default().with_title("Start here")));
    let copy = session.duplicate_page(&home).unwrap();

    assert_eq!(session.undo_levels(), 1);
    assert_eq!(page_names(&session), vec!["Start", "Start (copy)"]);

    let page = session.pages().get(&copy).unwrap();
    assert_eq!(page.visibility, Visibility::Public);
    assert_eq!(page.settings.title.as_deref(), Some("Start here"));
}

#[test]
fn test_duplicated_page_is_independent() {
    let mut session = session();
    let home = session.active_page_id().to_string();
    let title = session.insert_at_root("title", props([("text", "Hi")])).unwrap();

    let copy = session.duplicate_page(&home).unwrap();
    session.switch_page(&copy).unwrap();
    let copied_title = session.tree().roots()[0].id().to_string();
    assert_ne!(copied_title, title);

    session.update_props(&copied_title, props([("text", "Bye")]));
    session.switch_page(&home).unwrap();
    assert_eq!(
        session.tree().find_node(&title).and_then(|n| n.prop("text")).and_then(|v| v.as_str()),
        Some("Hi")
    );
}

#[test]
fn test_move_pages() {
    let mut session = session();
    let home = session.active_page_id().to_string();
    let blog = session.add_page("Blog", Tree::new()).unwrap();

    assert!(!session.move_page_up(&home));
    assert!(!session.move_page_down(&blog));
    assert!(session.move_page_down(&home));
    assert_eq!(page_names(&session), vec!["Blog", "Home"]);
}

#[test]
fn test_save_and_reload_session() -> anyhow::Result<()> {
    let mut session = session();
    let section = session.insert_at_root("container", Props::new())?;
    session.insert_into(&section, 0, "text", props([("text", "Inside")]))?;
    let blog = session.add_page("Blog", Tree::new())?;
    session.set_visibility(&blog, Visibility::Private);

    let json = serde_json::to_string(&session.into_pages())?;
    let pages: Vec<Page> = serde_json::from_str(&json)?;

    let config = EditorConfig {
        id_seed: Some("s".to_string()),
        ..EditorConfig::default()
    };
    let mut reloaded = EditSession::load("site", registry(), config, pages)?;
    assert_eq!(reloaded.pages().len(), 2);
    assert_eq!(reloaded.tree().node_count(), 2);
    assert!(!reloaded.can_undo());
    assert_eq!(reloaded.pages().get(&blog).map(|p| p.visibility), Some(Visibility::Private));

    // Fresh ids never collide with loaded ones
    let before = reloaded.tree().ids();
    let id = reloaded.insert_at_root("spacer", Props::new())?;
    assert!(!before.contains(&id));
    assert_ne!(id, blog);
    Ok(())
}

#[test]
fn test_load_rejects_duplicate_node_ids() {
    let tree = Tree::from_nodes([
        Node::new("dup", "text", Props::new()),
        Node::new("dup", "title", Props::new()),
    ]);
    let pages = vec![Page::new("p", "Home", tree)];
    let result = EditSession::load("site", registry(), EditorConfig::default(), pages);

    assert!(matches!(result, Err(EditorError::DuplicateNodeId { .. })));
}

#[test]
fn test_add_page_rejects_duplicate_node_ids() {
    let mut session = session();
    let version = session.version();
    let tree = Tree::from_nodes([
        Node::new("dup", "text", Props::new()),
        Node::new("dup", "title", Props::new()),
    ]);

    let result = session.add_page("Imported", tree);
    assert!(matches!(
        result,
        Err(EditorError::DuplicateNodeId { ref node_id, .. }) if node_id == "dup"
    ));
    assert_eq!(page_names(&session), vec!["Home"]);
    assert_eq!(session.version(), version);

    // A valid tree with the same shape is accepted and its blocks behave
    let tree = Tree::from_nodes([
        Node::new("a", "text", Props::new()),
        Node::new("b", "title", Props::new()),
    ]);
    let imported = session.add_page("Imported", tree).unwrap();
    session.switch_page(&imported).unwrap();
    session.select("a".to_string());
    assert!(session.remove("a"));
    assert_eq!(session.selected_id(), None);
    assert!(session.tree().find_node("b").is_some());
}

#[test]
fn test_apply_script_of_mutations() -> anyhow::Result<()> {
    let mut session = session();
    let script = r#"[
        { "InsertAtRoot": { "block_type": "columns" } },
        { "InsertAtRoot": { "block_type": "text", "props": { "text": "Hello" } } }
    ]"#;
    let mutations: Vec<Mutation> = serde_json::from_str(script)?;

    let mut created = Vec::new();
    for mutation in &mutations {
        let result = session.apply(mutation)?;
        created.extend(result.created);
    }
    assert_eq!(created.len(), 2);

    let result = session.apply(&Mutation::InsertInto {
        parent_id: created[1].clone(),
        index: 0,
        block_type: "text".to_string(),
        props: Props::new(),
    });
    assert!(result.is_err());

    let result = session.apply(&Mutation::InsertInto {
        parent_id: created[0].clone(),
        index: 5,
        block_type: "image".to_string(),
        props: Props::new(),
    })?;
    assert!(result.changed);
    assert_eq!(session.tree().roots()[0].children.len(), 1);
    assert_eq!(session.version(), 3);
    Ok(())
}
