//! Content panel for the Pull Requests tab: the diff review.
//!
//! Rendering is O(viewport): only the visible window of the review's
//! pre-built lines is materialised into ListItems per frame.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the review panel, or the selected PR's summary when no diff
/// is open.
pub fn render_review(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Content;
    let inner = inner_rect(area);
    let viewport = inner.height as usize;

    let Some(review) = &mut state.review else {
        let block = panel_block("Review", is_focused, theme);
        frame.render_widget(block, area);
        let msg = if state.diff_loading {
            "Loading diff..."
        } else {
            "Select a pull request and press Enter to review its diff."
        };
        frame.render_widget(
            Paragraph::new(Line::styled(msg, Style::default().fg(theme.dim))),
            inner,
        );
        return;
    };

    let accepted = review.selection.len();
    let total = review.result.diffs.len();
    let title = format!("Review — {} of {} accepted", accepted, total);
    let block = panel_block(title.as_str(), is_focused, theme);
    frame.render_widget(block, area);

    if review.is_empty() {
        frame.render_widget(
            Paragraph::new(vec![
                Line::raw("No differences between the fork and the main dataset."),
                Line::raw(""),
                Line::styled("Press Esc to close.", Style::default().fg(theme.dim)),
            ]),
            inner,
        );
        return;
    }

    if viewport == 0 {
        return;
    }

    // Reserve the last row for the action footer.
    let list_height = viewport.saturating_sub(1);
    let total_lines = review.lines.len();
    review.scroll = review.scroll.min(total_lines.saturating_sub(1));
    let start = review.scroll;
    let end = (start + list_height).min(total_lines);

    let items: Vec<ListItem> = review.lines[start..end]
        .iter()
        .map(|l| ListItem::new(l.clone()))
        .collect();
    let list_area = Rect {
        height: list_height as u16,
        ..inner
    };
    frame.render_widget(List::new(items), list_area);

    let footer_area = Rect {
        y: inner.y + list_height as u16,
        height: 1,
        ..inner
    };
    let footer = if review.submitting {
        Line::styled("Submitting...", Style::default().fg(theme.accent))
    } else {
        Line::from(vec![
            Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" toggle  ", Style::default().fg(theme.dim)),
            Span::styled("[/]", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" entry  ", Style::default().fg(theme.dim)),
            Span::styled("s", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" submit accepted  ", Style::default().fg(theme.dim)),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" close", Style::default().fg(theme.dim)),
        ])
    };
    frame.render_widget(Paragraph::new(footer), footer_area);
}
