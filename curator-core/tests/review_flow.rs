//! Integration tests for the review data path: wire parsing, selection
//! lifecycle, and diff segment rendering, exercised together the way the
//! TUI drives them.

use curator_core::segments::{modified_segments, pretty_item, SegmentKind};
use curator_core::selection::AcceptedSelection;
use curator_core::types::{DiffEntry, DiffResult, PrStatus, PullRequest};

const DIFF_JSON: &str = r#"{
    "total_changes": 2,
    "diffs": [
        {
            "index": 0,
            "type": "modified",
            "old_content": {"messages": [{"role": "user", "content": "a"}]},
            "new_content": {"messages": [{"role": "user", "content": "b"}]}
        },
        {
            "index": 1,
            "type": "added",
            "content": {"messages": [{"role": "user", "content": "c"}]}
        }
    ]
}"#;

#[test]
fn selective_merge_scenario() {
    // Opening a 2-entry diff selects both indices; toggling index 1 off
    // leaves [0] as the submitted set.
    let result: DiffResult = serde_json::from_str(DIFF_JSON).unwrap();
    assert_eq!(result.total_changes, 2);
    assert_eq!(result.indices(), vec![0, 1]);

    let mut selection = AcceptedSelection::default();
    selection.initialize(result.indices());
    assert_eq!(selection.snapshot(), vec![0, 1]);

    selection.toggle(1);
    assert_eq!(selection.snapshot(), vec![0]);
}

#[test]
fn diff_entries_parse_by_type_tag() {
    let result: DiffResult = serde_json::from_str(DIFF_JSON).unwrap();
    match &result.diffs[0] {
        DiffEntry::Modified {
            index,
            old_content,
            new_content,
        } => {
            assert_eq!(*index, 0);
            assert_eq!(old_content.messages[0].content, "a");
            assert_eq!(new_content.messages[0].content, "b");
        }
        other => panic!("expected modified entry, got {other:?}"),
    }
    match &result.diffs[1] {
        DiffEntry::Added { index, content } => {
            assert_eq!(*index, 1);
            assert_eq!(content.messages[0].content, "c");
        }
        other => panic!("expected added entry, got {other:?}"),
    }
}

#[test]
fn empty_diff_yields_empty_selection() {
    let result: DiffResult =
        serde_json::from_str(r#"{"total_changes": 0, "diffs": []}"#).unwrap();
    let mut selection = AcceptedSelection::default();
    selection.initialize(result.indices());
    assert!(selection.is_empty());
    assert!(selection.snapshot().is_empty());
}

#[test]
fn modified_segments_cover_both_sides() {
    let result: DiffResult = serde_json::from_str(DIFF_JSON).unwrap();
    let DiffEntry::Modified {
        old_content,
        new_content,
        ..
    } = &result.diffs[0]
    else {
        panic!("expected modified entry");
    };

    let segments = modified_segments(old_content, new_content);

    let old_side: Vec<&str> = segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Added)
        .map(|s| s.text.as_str())
        .collect();
    let new_side: Vec<&str> = segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Removed)
        .map(|s| s.text.as_str())
        .collect();

    assert_eq!(old_side.join("\n"), pretty_item(old_content));
    assert_eq!(new_side.join("\n"), pretty_item(new_content));
}

#[test]
fn pr_status_is_terminal_once_decided() {
    let pr: PullRequest = serde_json::from_str(
        r#"{
            "_id": "6655aa",
            "dataset_path": "multi-turn/coding.json",
            "username": "mira",
            "description": "fix role labels",
            "created_at": "2025-11-02T10:15:00",
            "status": "open"
        }"#,
    )
    .unwrap();
    assert_eq!(pr.id, "6655aa");
    assert_eq!(pr.status, PrStatus::Open);
    assert!(!pr.status.is_terminal());

    assert!(PrStatus::Merged.is_terminal());
    assert!(PrStatus::Rejected.is_terminal());
}

#[test]
fn thinking_presence_survives_round_trip() {
    // Absent `thinking` must stay absent; an empty string must stay an
    // empty string. Presence itself is meaningful.
    let with: curator_core::types::DatasetItem = serde_json::from_str(
        r#"{"messages": [{"role": "assistant", "content": "hi", "thinking": ""}]}"#,
    )
    .unwrap();
    let without: curator_core::types::DatasetItem =
        serde_json::from_str(r#"{"messages": [{"role": "assistant", "content": "hi"}]}"#)
            .unwrap();

    assert_eq!(with.messages[0].thinking.as_deref(), Some(""));
    assert_eq!(without.messages[0].thinking, None);

    let with_json = serde_json::to_string(&with).unwrap();
    let without_json = serde_json::to_string(&without).unwrap();
    assert!(with_json.contains("thinking"));
    assert!(!without_json.contains("thinking"));
}
