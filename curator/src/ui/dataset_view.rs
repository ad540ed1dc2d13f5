//! Content panel for the Datasets tab: paged item browser and the raw
//! JSON editor.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use curator_core::types::DatasetItem;

use crate::app::{AppState, DatasetView, EditorState, Mode, PanelFocus, ITEMS_PER_PAGE};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the Datasets content panel: the editor when one is open,
/// otherwise the paged item view.
pub fn render_dataset(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Content;

    if state.mode == Mode::JsonEdit {
        if let Some(editor) = &mut state.editor {
            render_editor(frame, area, editor, theme);
            return;
        }
    }

    let block = panel_block("Dataset", is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if let Some(error) = &state.dataset_error {
        let lines = vec![
            Line::styled("Failed to load dataset", Style::default().fg(theme.toast_error)),
            Line::raw(""),
            Line::raw(error.clone()),
            Line::raw(""),
            Line::styled("Press Enter to retry.", Style::default().fg(theme.dim)),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    if state.dataset_loading {
        frame.render_widget(Paragraph::new("Loading dataset..."), inner);
        return;
    }

    let Some(view) = &mut state.dataset else {
        frame.render_widget(
            Paragraph::new(Line::styled(
                "Select a dataset and press Enter.",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    };

    let lines = page_lines(view, theme);
    let viewport = inner.height as usize;
    view.scroll = view.scroll.min(lines.len().saturating_sub(1));
    let start = view.scroll;
    let end = (start + viewport).min(lines.len());

    let items: Vec<ListItem> = lines[start..end]
        .iter()
        .map(|l| ListItem::new(l.clone()))
        .collect();
    frame.render_widget(List::new(items), inner);
}

/// Builds the display lines for the current page: a header line, then
/// each item's messages.
fn page_lines(view: &DatasetView, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    let mut header = vec![Span::styled(
        view.info.path.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if view.is_fork {
        let badge = if view.has_changes {
            "  fork (modified)"
        } else {
            "  fork"
        };
        header.push(Span::styled(badge, Style::default().fg(theme.accent)));
    }
    lines.push(Line::from(header));
    lines.push(Line::styled(
        format!(
            "{}  {} items  page {}/{}",
            view.info.turn_type.label(),
            view.items.len(),
            view.page + 1,
            view.page_count()
        ),
        Style::default().fg(theme.dim),
    ));
    lines.push(Line::raw(""));

    let base = view.page * ITEMS_PER_PAGE;
    for (offset, item) in view.page_items().iter().enumerate() {
        lines.extend(item_lines(base + offset, item, theme));
        lines.push(Line::raw(""));
    }

    lines
}

fn item_lines(index: usize, item: &DatasetItem, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    let mut header = vec![Span::styled(
        format!("item {}", index),
        Style::default()
            .fg(theme.diff_entry_header)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(editor) = &item.last_edited_by {
        header.push(Span::styled(
            format!("  edited by {}", editor),
            Style::default().fg(theme.dim),
        ));
    }
    lines.push(Line::from(header));

    for message in &item.messages {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}: ", message.role.label()),
                Style::default().fg(theme.accent),
            ),
            Span::raw(first_line(&message.content)),
        ]));
        if message.thinking.is_some() {
            lines.push(Line::styled(
                "    (has thinking)",
                Style::default().fg(theme.dim),
            ));
        }
    }

    lines
}

/// First line of a message, truncated for the one-row preview.
fn first_line(content: &str) -> String {
    let line = content.lines().next().unwrap_or("");
    if line.chars().count() > 200 {
        let truncated: String = line.chars().take(200).collect();
        format!("{}...", truncated)
    } else {
        line.to_owned()
    }
}

/// Renders the JSON editor: the buffer with a hardware cursor at the
/// edit position, scrolled so the cursor row stays visible.
fn render_editor(frame: &mut Frame, area: Rect, editor: &mut EditorState, theme: &Theme) {
    let title = if editor.dirty {
        "Edit JSON (unsaved)"
    } else if editor.saving {
        "Edit JSON (saving...)"
    } else {
        "Edit JSON"
    };
    let block = panel_block(title, true, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let viewport = inner.height as usize;
    if editor.cursor_row < editor.scroll {
        editor.scroll = editor.cursor_row;
    } else if viewport > 0 && editor.cursor_row >= editor.scroll + viewport {
        editor.scroll = editor.cursor_row - viewport + 1;
    }

    let end = (editor.scroll + viewport).min(editor.lines.len());
    let items: Vec<ListItem> = editor.lines[editor.scroll..end]
        .iter()
        .map(|l| ListItem::new(Line::raw(l.clone())))
        .collect();
    frame.render_widget(List::new(items), inner);

    let cursor_x = inner.x + editor.cursor_col.min(u16::MAX as usize) as u16;
    let cursor_y = inner.y + (editor.cursor_row - editor.scroll) as u16;
    if inner.width > 0 {
        frame.set_cursor_position(Position {
            x: cursor_x.min(inner.x + inner.width - 1),
            y: cursor_y,
        });
    }
}
