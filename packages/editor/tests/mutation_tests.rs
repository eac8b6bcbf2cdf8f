//! Comprehensive mutation tests

use sitecraft_editor::{
    find, Document, Mutation, MutationError, MutationResult, NodeOverrides, NodeType, Property,
    ROOT_ID,
};
use sitecraft_document::{Animation, AnimationPreset, Interaction, LayoutMode};

fn styles(pairs: &[(&str, &str)]) -> sitecraft_editor::Styles {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_find_returns_matching_node_for_every_id() {
    let mut doc = Document::new("landing");
    let section = doc
        .insert_child(ROOT_ID, NodeType::Section, NodeOverrides::default())
        .unwrap();
    doc.insert_child(&section, NodeType::Product, NodeOverrides::default());
    doc.insert_child(&section, NodeType::Text, NodeOverrides::default());

    for id in doc.tree().ids() {
        let node = find(doc.tree(), &id).expect("every id is findable");
        assert_eq!(node.id, id);
    }
}

#[test]
fn test_insert_child_applies_overrides_on_defaults() {
    let mut doc = Document::new("landing");
    let overrides = NodeOverrides::default()
        .with_content("Hello")
        .with_style("color", "#ff0000");
    let id = doc.insert_child(ROOT_ID, NodeType::Text, overrides).unwrap();

    let node = doc.find(&id).unwrap();
    assert_eq!(node.content.as_deref(), Some("Hello"));
    assert_eq!(node.style("color"), Some("#ff0000"));
    assert_eq!(node.style("fontSize"), Some("16px"));
}

#[test]
fn test_insert_child_appends_in_authoring_order() {
    let mut doc = Document::new("landing");
    let a = doc
        .insert_child(ROOT_ID, NodeType::Text, NodeOverrides::default())
        .unwrap();
    let b = doc
        .insert_child(ROOT_ID, NodeType::Button, NodeOverrides::default())
        .unwrap();

    let order: Vec<_> = doc.tree().children.iter().map(|c| c.id.clone()).collect();
    assert_eq!(order, vec![a, b]);
}

#[test]
fn test_insert_into_missing_parent_is_noop() {
    let mut doc = Document::new("landing");
    let before = doc.tree().clone();

    assert!(doc
        .insert_child("nowhere", NodeType::Text, NodeOverrides::default())
        .is_none());
    assert_eq!(doc.tree(), &before);
    assert_eq!(doc.version(), 0);
}

#[test]
fn test_update_styles_merges() {
    let mut doc = Document::new("landing");
    let id = doc
        .insert_child(ROOT_ID, NodeType::Container, NodeOverrides::default())
        .unwrap();

    doc.update_styles(&id, styles(&[("a", "1")]));
    doc.update_styles(&id, styles(&[("b", "2")]));

    let node = doc.find(&id).unwrap();
    assert_eq!(node.style("a"), Some("1"));
    assert_eq!(node.style("b"), Some("2"));
    assert_eq!(node.style("display"), Some("flex"));
}

#[test]
fn test_update_styles_is_idempotent() {
    let mut doc = Document::new("landing");
    let id = doc
        .insert_child(ROOT_ID, NodeType::Container, NodeOverrides::default())
        .unwrap();

    doc.update_styles(&id, styles(&[("gap", "12px"), ("color", "blue")]));
    let once = doc.find(&id).unwrap().styles.clone();
    doc.update_styles(&id, styles(&[("gap", "12px"), ("color", "blue")]));
    assert_eq!(doc.find(&id).unwrap().styles, once);
}

#[test]
fn test_update_styles_last_write_wins() {
    let mut doc = Document::new("landing");
    let id = doc
        .insert_child(ROOT_ID, NodeType::Text, NodeOverrides::default())
        .unwrap();

    doc.update_styles(&id, styles(&[("color", "red")]));
    doc.update_styles(&id, styles(&[("color", "green")]));
    assert_eq!(doc.find(&id).unwrap().style("color"), Some("green"));
}

#[test]
fn test_update_content_and_properties() {
    let mut doc = Document::new("landing");
    let id = doc
        .insert_child(ROOT_ID, NodeType::Container, NodeOverrides::default())
        .unwrap();

    assert!(doc
        .update_property(&id, Property::LayoutMode(LayoutMode::Free))
        .is_applied());
    assert!(doc
        .update_property(&id, Property::Animation(Some(Animation::new(AnimationPreset::FadeIn))))
        .is_applied());
    assert!(doc
        .update_property(
            &id,
            Property::Interaction(Some(Interaction::NavigateToPage {
                page_id: "about".to_string()
            }))
        )
        .is_applied());

    let node = doc.find(&id).unwrap();
    assert_eq!(node.layout_mode, LayoutMode::Free);
    assert_eq!(node.animation.as_ref().unwrap().preset, AnimationPreset::FadeIn);
    assert!(node.interaction.is_some());

    let text = doc
        .insert_child(ROOT_ID, NodeType::Text, NodeOverrides::default())
        .unwrap();
    doc.update_content(&text, "Updated");
    assert_eq!(doc.find(&text).unwrap().content.as_deref(), Some("Updated"));
}

#[test]
fn test_remove_node() {
    let mut doc = Document::new("landing");
    let section = doc
        .insert_child(ROOT_ID, NodeType::Section, NodeOverrides::default())
        .unwrap();
    let text = doc
        .insert_child(&section, NodeType::Text, NodeOverrides::default())
        .unwrap();

    assert!(doc.remove(&section).is_applied());
    assert!(doc.find(&section).is_none());
    assert!(doc.find(&text).is_none());
}

#[test]
fn test_remove_root_is_noop() {
    let mut doc = Document::new("landing");
    doc.insert_child(ROOT_ID, NodeType::Section, NodeOverrides::default());
    let before = doc.tree().clone();

    assert_eq!(
        doc.remove(ROOT_ID),
        MutationResult::Noop {
            reason: MutationError::RootProtected
        }
    );
    assert_eq!(doc.tree(), &before);
}

#[test]
fn test_remove_missing_is_noop() {
    let mut doc = Document::new("landing");
    assert!(doc.remove("ghost").is_noop());
}

#[test]
fn test_reparent_moves_subtree() {
    let mut doc = Document::new("landing");
    let old_parent = doc
        .insert_child(ROOT_ID, NodeType::Section, NodeOverrides::default())
        .unwrap();
    let new_parent = doc
        .insert_child(ROOT_ID, NodeType::Container, NodeOverrides::default())
        .unwrap();
    let node = doc
        .insert_child(&old_parent, NodeType::Row, NodeOverrides::default())
        .unwrap();
    let grandchild = doc
        .insert_child(&node, NodeType::Text, NodeOverrides::default())
        .unwrap();

    assert!(doc.reparent(&node, &new_parent).is_applied());

    let new_parent_node = doc.find(&new_parent).unwrap();
    let old_parent_node = doc.find(&old_parent).unwrap();
    assert!(new_parent_node.contains(&node));
    assert!(new_parent_node.contains(&grandchild));
    assert!(!old_parent_node.contains(&node));
}

#[test]
fn test_reparent_into_own_descendant_is_noop() {
    let mut doc = Document::new("landing");
    let outer = doc
        .insert_child(ROOT_ID, NodeType::Section, NodeOverrides::default())
        .unwrap();
    let inner = doc
        .insert_child(&outer, NodeType::Container, NodeOverrides::default())
        .unwrap();
    let before = doc.tree().clone();

    assert_eq!(
        doc.reparent(&outer, &inner),
        MutationResult::Noop {
            reason: MutationError::CycleDetected
        }
    );
    assert_eq!(
        doc.reparent(&outer, &outer),
        MutationResult::Noop {
            reason: MutationError::CycleDetected
        }
    );
    assert_eq!(doc.tree(), &before);
}

#[test]
fn test_reparent_root_is_noop() {
    let mut doc = Document::new("landing");
    let section = doc
        .insert_child(ROOT_ID, NodeType::Section, NodeOverrides::default())
        .unwrap();
    assert!(doc.reparent(ROOT_ID, &section).is_noop());
}

#[test]
fn test_reparent_into_leaf_is_noop() {
    let mut doc = Document::new("landing");
    let text = doc
        .insert_child(ROOT_ID, NodeType::Text, NodeOverrides::default())
        .unwrap();
    let image = doc
        .insert_child(ROOT_ID, NodeType::Image, NodeOverrides::default())
        .unwrap();
    assert_eq!(
        doc.reparent(&image, &text),
        MutationResult::Noop {
            reason: MutationError::InvalidParent(text.clone())
        }
    );
}

#[test]
fn test_mutations_from_json() {
    let mut doc = Document::new("landing");
    let id = doc
        .insert_child(ROOT_ID, NodeType::Text, NodeOverrides::default())
        .unwrap();

    let json = format!(
        r#"{{ "op": "updateProperty", "nodeId": "{}", "property": {{ "key": "name", "value": "Headline" }} }}"#,
        id
    );
    let mutation: Mutation = serde_json::from_str(&json).unwrap();
    assert!(doc.apply(mutation).is_applied());
    assert_eq!(doc.find(&id).unwrap().name.as_deref(), Some("Headline"));
}
