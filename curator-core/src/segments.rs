//! Pure diff-to-segments transform for the review panel.
//!
//! The structural comparison itself comes from the backend (which items
//! changed); this module only turns a modified item's before/after pair
//! into line-level segments tagged added/removed/unchanged, using the
//! `similar` crate over pretty-printed JSON. Deterministic: identical
//! inputs always produce identical output, and inputs are never mutated.

use similar::{ChangeTag, TextDiff};

use crate::types::DatasetItem;

/// How a segment should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Added,
    Removed,
    Unchanged,
}

/// One contiguous run of diff output.
///
/// `text` is a full line of the pretty-printed item without its trailing
/// newline. Concatenating the `Unchanged` + `Removed` segments (with
/// newlines) reassembles the old side exactly; `Unchanged` + `Added`
/// reassembles the new side — no content is ever dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Pretty-prints a dataset item for whole-item display (added/removed
/// entries) and as the diff input for modified entries.
pub fn pretty_item(item: &DatasetItem) -> String {
    serde_json::to_string_pretty(item).unwrap_or_default()
}

/// Line-level segments for a modified entry's before/after pair.
pub fn modified_segments(old: &DatasetItem, new: &DatasetItem) -> Vec<DiffSegment> {
    let old_text = pretty_item(old);
    let new_text = pretty_item(new);
    let diff = TextDiff::from_lines(&old_text, &new_text);

    diff.iter_all_changes()
        .map(|change| {
            let kind = match change.tag() {
                ChangeTag::Insert => SegmentKind::Added,
                ChangeTag::Delete => SegmentKind::Removed,
                ChangeTag::Equal => SegmentKind::Unchanged,
            };
            DiffSegment {
                kind,
                text: change.value().trim_end_matches('\n').to_owned(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Message, Role};

    fn item(content: &str) -> DatasetItem {
        DatasetItem {
            messages: vec![Message {
                role: Role::User,
                content: content.to_owned(),
                thinking: None,
            }],
            last_edited_by: None,
        }
    }

    fn reassemble(segments: &[DiffSegment], keep: SegmentKind) -> String {
        segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Unchanged || s.kind == keep)
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn segments_account_for_both_sides() {
        let old = item("a");
        let new = item("b");
        let segments = modified_segments(&old, &new);

        assert_eq!(reassemble(&segments, SegmentKind::Removed), pretty_item(&old));
        assert_eq!(reassemble(&segments, SegmentKind::Added), pretty_item(&new));
    }

    #[test]
    fn identical_inputs_yield_only_unchanged() {
        let it = item("same");
        let segments = modified_segments(&it, &it);
        assert!(!segments.is_empty());
        assert!(segments.iter().all(|s| s.kind == SegmentKind::Unchanged));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let old = item("x");
        let new = item("y");
        assert_eq!(modified_segments(&old, &new), modified_segments(&old, &new));
    }
}
