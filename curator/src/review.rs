//! Review session state for one open PR diff.
//!
//! A `ReviewState` is created when a diff fetch completes and discarded
//! when the review closes; the accepted-index selection lives inside it
//! and nowhere else. Display lines are pre-built once per load (and per
//! toggle, for the affected header only), so the render path stays
//! O(viewport).

use curator_core::segments::{modified_segments, pretty_item, SegmentKind};
use curator_core::selection::AcceptedSelection;
use curator_core::types::{DiffEntry, DiffResult};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::Theme;

/// All state for the currently open review, if any.
pub struct ReviewState {
    pub pr_id: String,
    /// Review session counter value at open time. Outcomes carrying an
    /// older value belong to an abandoned session and are dropped.
    pub seq: u64,
    pub result: DiffResult,
    pub selection: AcceptedSelection,
    /// Pre-built display lines for the whole diff.
    pub lines: Vec<Line<'static>>,
    /// Index into `lines` of each entry's header, in display order.
    pub entry_offsets: Vec<usize>,
    /// Which entry the cursor is on (index into `result.diffs`).
    pub cursor: usize,
    /// Vertical scroll offset into `lines`.
    pub scroll: usize,
    /// True while a selective-merge submission is in flight. The submit
    /// trigger is a no-op while set.
    pub submitting: bool,
}

impl ReviewState {
    /// Builds the review for a freshly fetched diff. The selection starts
    /// with every index accepted.
    pub fn new(pr_id: String, seq: u64, result: DiffResult, theme: &Theme) -> Self {
        let mut selection = AcceptedSelection::default();
        selection.initialize(result.indices());
        let (lines, entry_offsets) = build_lines(&result, &selection, theme);
        Self {
            pr_id,
            seq,
            result,
            selection,
            lines,
            entry_offsets,
            cursor: 0,
            scroll: 0,
            submitting: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.result.diffs.is_empty()
    }

    /// Whether the submit action is currently available.
    pub fn can_submit(&self) -> bool {
        !self.is_empty() && !self.submitting
    }

    /// Toggles acceptance of the entry under the cursor and refreshes its
    /// header line. Only entries present in the result are reachable by
    /// the cursor, so the selection's subset invariant holds.
    pub fn toggle_at_cursor(&mut self, theme: &Theme) {
        let Some(entry) = self.result.diffs.get(self.cursor) else {
            return;
        };
        self.selection.toggle(entry.index());
        let accepted = self.selection.contains(entry.index());
        if let Some(&offset) = self.entry_offsets.get(self.cursor) {
            self.lines[offset] = header_line(entry, accepted, theme);
        }
    }

    /// Moves the cursor to the next entry and scrolls its header into view.
    pub fn next_entry(&mut self) {
        if self.entry_offsets.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.entry_offsets.len() - 1);
        self.scroll = self.entry_offsets[self.cursor];
    }

    /// Moves the cursor to the previous entry and scrolls it into view.
    pub fn prev_entry(&mut self) {
        if self.entry_offsets.is_empty() {
            return;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.scroll = self.entry_offsets[self.cursor];
    }
}

/// Builds display lines for every entry plus the offsets of their headers.
fn build_lines(
    result: &DiffResult,
    selection: &AcceptedSelection,
    theme: &Theme,
) -> (Vec<Line<'static>>, Vec<usize>) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    for entry in &result.diffs {
        offsets.push(lines.len());
        lines.push(header_line(entry, selection.contains(entry.index()), theme));
        lines.extend(entry_body_lines(entry, theme));
        lines.push(Line::raw(""));
    }

    (lines, offsets)
}

/// One entry header: checkbox, item index, change kind, accept state.
fn header_line(entry: &DiffEntry, accepted: bool, theme: &Theme) -> Line<'static> {
    let checkbox = if accepted {
        Span::styled("[x] ", Style::default().fg(theme.diff_added))
    } else {
        Span::styled("[ ] ", Style::default().fg(theme.dim))
    };
    let kind_color = match entry {
        DiffEntry::Added { .. } => theme.diff_added,
        DiffEntry::Removed { .. } => theme.diff_removed,
        DiffEntry::Modified { .. } => theme.diff_entry_header,
    };
    let label = Span::styled(
        format!("item {}  {}", entry.index(), entry.kind_label()),
        Style::default().fg(kind_color).add_modifier(Modifier::BOLD),
    );
    let verdict = if accepted {
        Span::styled("  ACCEPTED", Style::default().fg(theme.diff_added))
    } else {
        Span::styled("  REJECTED", Style::default().fg(theme.dim))
    };
    Line::from(vec![checkbox, label, verdict])
}

/// Body lines for one entry: whole-item pretty print for added/removed,
/// line-level segments for modified.
fn entry_body_lines(entry: &DiffEntry, theme: &Theme) -> Vec<Line<'static>> {
    match entry {
        DiffEntry::Added { content, .. } => prefixed_lines(content, '+', theme.diff_added),
        DiffEntry::Removed { content, .. } => {
            prefixed_lines(content, '-', theme.diff_removed)
        }
        DiffEntry::Modified {
            old_content,
            new_content,
            ..
        } => modified_segments(old_content, new_content)
            .into_iter()
            .map(|segment| {
                let (prefix, color) = match segment.kind {
                    SegmentKind::Added => ("+ ", theme.diff_added),
                    SegmentKind::Removed => ("- ", theme.diff_removed),
                    SegmentKind::Unchanged => ("  ", theme.diff_context),
                };
                Line::from(vec![
                    Span::styled(prefix, Style::default().fg(color)),
                    Span::styled(segment.text, Style::default().fg(color)),
                ])
            })
            .collect(),
    }
}

fn prefixed_lines(
    item: &curator_core::types::DatasetItem,
    prefix: char,
    color: ratatui::style::Color,
) -> Vec<Line<'static>> {
    pretty_item(item)
        .lines()
        .map(|line| {
            Line::from(vec![
                Span::styled(format!("{} ", prefix), Style::default().fg(color)),
                Span::styled(line.to_owned(), Style::default().fg(color)),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> DiffResult {
        serde_json::from_str(
            r#"{
                "total_changes": 2,
                "diffs": [
                    {"index": 0, "type": "modified",
                     "old_content": {"messages": [{"role": "user", "content": "a"}]},
                     "new_content": {"messages": [{"role": "user", "content": "b"}]}},
                    {"index": 1, "type": "added",
                     "content": {"messages": [{"role": "user", "content": "c"}]}}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn new_review_accepts_all_indices() {
        let review = ReviewState::new("pr1".into(), 1, sample_result(), &Theme::dark());
        assert_eq!(review.selection.snapshot(), vec![0, 1]);
        assert_eq!(review.entry_offsets.len(), 2);
        assert!(review.can_submit());
    }

    #[test]
    fn toggle_at_cursor_flips_only_that_entry() {
        let theme = Theme::dark();
        let mut review = ReviewState::new("pr1".into(), 1, sample_result(), &theme);
        review.next_entry();
        review.toggle_at_cursor(&theme);
        assert_eq!(review.selection.snapshot(), vec![0]);
        review.toggle_at_cursor(&theme);
        assert_eq!(review.selection.snapshot(), vec![0, 1]);
    }

    #[test]
    fn empty_diff_disables_submit() {
        let result: DiffResult =
            serde_json::from_str(r#"{"total_changes": 0, "diffs": []}"#).unwrap();
        let review = ReviewState::new("pr1".into(), 1, result, &Theme::dark());
        assert!(review.is_empty());
        assert!(!review.can_submit());
    }

    #[test]
    fn submitting_flag_blocks_resubmit() {
        let mut review = ReviewState::new("pr1".into(), 1, sample_result(), &Theme::dark());
        review.submitting = true;
        assert!(!review.can_submit());
    }
}
