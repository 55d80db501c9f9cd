//! Outline building, marking and anchor resolution

use docanchor_editor::{
    apply_ops, derive_anchor, load_persisted_outline, resolve_insertion_point, IdentityScheme,
    Operation, OutlineBuilder, OutlineConfig, DEFAULT_OUTLINE_KEY,
};
use docanchor_host::{DocumentHost, MemoryDocument, NORMAL_STYLE};

fn report() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.host.push_heading(1, "Report");
    doc.host.push_paragraph("Summary of findings.", NORMAL_STYLE);
    doc.host.push_heading(2, "Details");
    doc.host.push_paragraph("Summary of findings.", NORMAL_STYLE);
    doc
}

fn build(doc: &mut MemoryDocument, scheme: IdentityScheme) -> Vec<docanchor_editor::OutlineItem> {
    let builder = OutlineBuilder::new(OutlineConfig {
        scheme,
        ..OutlineConfig::default()
    });
    let (host, settings) = doc.split_mut();
    builder.build(host, settings).unwrap()
}

#[test]
fn test_outline_follows_document_order() {
    let mut doc = report();
    let outline = build(&mut doc, IdentityScheme::Positional);

    let texts: Vec<&str> = outline.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Report", "Summary of findings.", "Details", "Summary of findings."]
    );
    assert_eq!(
        outline[1].paragraph_id,
        derive_anchor("Summary of findings.", 0, 1)
    );
    // Identical text at another position gets another anchor
    assert_ne!(outline[1].paragraph_id, outline[3].paragraph_id);
}

#[test]
fn test_rebuild_is_idempotent() {
    let mut doc = report();
    let first = build(&mut doc, IdentityScheme::Positional);
    let markers_after_first = doc.host.marker_count();
    let second = build(&mut doc, IdentityScheme::Positional);

    assert_eq!(first, second);
    assert_eq!(doc.host.marker_count(), markers_after_first);
    for item in &second {
        assert_eq!(doc.host.markers_by_tag(item.paragraph_id.as_str()).unwrap().len(), 1);
    }
}

#[test]
fn test_every_anchor_resolves_next_to_its_block() {
    let mut doc = report();
    let outline = build(&mut doc, IdentityScheme::Positional);

    for item in &outline {
        let marked = doc.host.markers_by_tag(item.paragraph_id.as_str()).unwrap()[0].block;
        let handle = resolve_insertion_point(&mut doc.host, &item.paragraph_id).unwrap();

        let ids: Vec<_> = doc.host.nodes().iter().map(|n| n.id()).collect();
        let at = ids.iter().position(|id| *id == marked).unwrap();
        assert_eq!(ids[at + 1], handle.block());

        handle.discard(&mut doc.host).unwrap();
    }
    assert_eq!(doc.host.blocks().unwrap().len(), 4);
}

#[test]
fn test_outline_is_persisted_and_overwritten() {
    let mut doc = report();
    let outline = build(&mut doc, IdentityScheme::Positional);
    assert_eq!(
        load_persisted_outline(&doc.settings, DEFAULT_OUTLINE_KEY).unwrap(),
        Some(outline)
    );

    doc.host.push_paragraph("Closing words", NORMAL_STYLE);
    let rebuilt = build(&mut doc, IdentityScheme::Positional);
    let stored = load_persisted_outline(&doc.settings, DEFAULT_OUTLINE_KEY)
        .unwrap()
        .unwrap();
    assert_eq!(stored.len(), 5);
    assert_eq!(stored, rebuilt);
}

#[test]
fn test_positional_anchors_shift_after_earlier_insert() {
    let mut doc = report();
    let before = build(&mut doc, IdentityScheme::Positional);

    let first = doc.host.blocks().unwrap()[0].id;
    doc.host
        .insert_paragraph(first, "Preface", docanchor_host::Placement::Before)
        .unwrap();
    let after = build(&mut doc, IdentityScheme::Positional);

    assert_ne!(before[0].paragraph_id, after[1].paragraph_id);
    // Old markers are kept, so the old anchor still resolves to the old block
    assert_eq!(
        doc.host.markers_by_tag(before[0].paragraph_id.as_str()).unwrap().len(),
        1
    );
}

#[test]
fn test_occurrence_anchors_survive_unrelated_insert() {
    let mut doc = report();
    let before = build(&mut doc, IdentityScheme::Occurrence);
    assert_ne!(before[1].paragraph_id, before[3].paragraph_id);
    let markers = doc.host.marker_count();

    let first = doc.host.blocks().unwrap()[0].id;
    doc.host
        .insert_paragraph(first, "Preface", docanchor_host::Placement::Before)
        .unwrap();
    let after = build(&mut doc, IdentityScheme::Occurrence);

    assert_eq!(&after[1..], &before[..]);
    // Only the new paragraph needed a marker
    assert_eq!(doc.host.marker_count(), markers + 1);
}

#[test]
fn test_markers_survive_reopening() {
    let mut doc = report();
    let outline = build(&mut doc, IdentityScheme::Positional);

    let mut reopened = MemoryDocument::from_json(&doc.to_json().unwrap()).unwrap();
    let handle = resolve_insertion_point(&mut reopened.host, &outline[2].paragraph_id).unwrap();
    handle
        .fill_paragraph(&mut reopened.host, "Inserted later", NORMAL_STYLE)
        .unwrap();

    assert_eq!(reopened.host.paragraph_texts()[3], "Inserted later");
    let again = build(&mut reopened, IdentityScheme::Positional);
    assert_eq!(again.len(), 5);
}

#[test]
fn test_stale_marker_is_moved_not_duplicated() {
    let mut doc = MemoryDocument::new();
    doc.host.push_paragraph("A", NORMAL_STYLE);
    doc.host.push_paragraph("B", NORMAL_STYLE);
    doc.host.push_paragraph("T", NORMAL_STYLE);
    let before = build(&mut doc, IdentityScheme::Positional);

    // [A, B, T] -> [B, T, T']; T' now derives the anchor T had before
    let ops = vec![
        Operation::RemoveParagraph {
            paragraph_id: Some(before[0].paragraph_id.clone()),
            find: None,
        },
        Operation::AddParagraph {
            text: "T".into(),
            after_paragraph_id: Some(before[2].paragraph_id.clone()),
        },
    ];
    apply_ops(&mut doc.host, &ops).unwrap();
    let after = build(&mut doc, IdentityScheme::Positional);
    assert_eq!(after[2].paragraph_id, before[2].paragraph_id);

    let blocks = doc.host.blocks().unwrap();
    for item in &after {
        assert_eq!(doc.host.markers_by_tag(item.paragraph_id.as_str()).unwrap().len(), 1);
    }
    let marker = &doc.host.markers_by_tag(after[2].paragraph_id.as_str()).unwrap()[0];
    assert_eq!(marker.block, blocks[2].id);

    let handle = resolve_insertion_point(&mut doc.host, &after[2].paragraph_id).unwrap();
    let ids: Vec<_> = doc.host.nodes().iter().map(|n| n.id()).collect();
    assert_eq!(ids[3], handle.block());
    handle.discard(&mut doc.host).unwrap();

    // A second build changes nothing
    let markers = doc.host.marker_count();
    assert_eq!(build(&mut doc, IdentityScheme::Positional), after);
    assert_eq!(doc.host.marker_count(), markers);
}
