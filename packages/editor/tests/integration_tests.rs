//! Integration tests for editor crate

use sitecraft_editor::{
    AssetTarget, Document, EditSession, NodeOverrides, NodeType, TaskOutcome, ROOT_ID,
};

#[test]
fn test_document_lifecycle() -> anyhow::Result<()> {
    let mut doc = Document::new("landing");
    assert_eq!(doc.version(), 0);

    let section = doc
        .insert_child(ROOT_ID, NodeType::Section, NodeOverrides::default())
        .expect("root accepts children");
    doc.insert_child(
        &section,
        NodeType::Text,
        NodeOverrides::default().with_content("Hello"),
    );

    // Persist and restore through the template JSON format
    let json = doc.to_json()?;
    let mut restored = Document::from_json("landing", &json)?;
    assert_eq!(restored.tree(), doc.tree());

    // Loading replaces everything
    restored.load(sitecraft_editor::Node::root())?;
    assert!(restored.find(&section).is_none());
    assert_eq!(restored.tree().count(), 1);

    Ok(())
}

#[test]
fn test_two_images_then_remove_first() {
    let mut doc = Document::new("gallery");
    let first = doc
        .insert_child(ROOT_ID, NodeType::Image, NodeOverrides::default())
        .unwrap();
    let second = doc
        .insert_child(ROOT_ID, NodeType::Image, NodeOverrides::default())
        .unwrap();

    doc.remove(&first);

    let images: Vec<_> = doc
        .tree()
        .children
        .iter()
        .filter(|c| c.node_type == NodeType::Image)
        .collect();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].id, second);
}

#[test]
fn test_upload_workflow() -> anyhow::Result<()> {
    let mut doc = Document::new("landing");
    let image = doc
        .insert_child(ROOT_ID, NodeType::Image, NodeOverrides::default())
        .unwrap();
    let mut session = EditSession::new("author", doc);

    // Upload succeeds
    let ok = session
        .begin_task(AssetTarget::ReplaceContent {
            node_id: image.clone(),
        })
        .unwrap();
    let outcome = session.complete_task(ok.task_id, Ok("data:image/png;base64,AAAA".to_string()))?;
    assert!(matches!(outcome, TaskOutcome::Applied { .. }));

    // Moderation refuses the next one
    let refused = session
        .begin_task(AssetTarget::ReplaceContent {
            node_id: image.clone(),
        })
        .unwrap();
    let outcome = session.complete_task(refused.task_id, Err("Adult content".to_string()))?;
    assert_eq!(
        outcome,
        TaskOutcome::Rejected {
            reason: "Adult content".to_string()
        }
    );
    assert_eq!(
        session.document.find(&image).unwrap().content.as_deref(),
        Some("data:image/png;base64,AAAA")
    );

    Ok(())
}

#[test]
fn test_begin_task_on_missing_node() {
    let mut session = EditSession::new("author", Document::new("landing"));
    assert!(session
        .begin_task(AssetTarget::ReplaceContent {
            node_id: "ghost".to_string()
        })
        .is_none());
}
