//! Content panel for the Repository tab: remote URL plus the last
//! sync/push output.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_repo(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Content;
    let block = panel_block("Remote", is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    let remote = if state.repo.remote_url.is_empty() {
        Span::styled("(not configured)", Style::default().fg(theme.dim))
    } else {
        Span::raw(state.repo.remote_url.as_str())
    };
    lines.push(Line::from(vec![
        Span::styled("remote: ", Style::default().add_modifier(Modifier::BOLD)),
        remote,
    ]));
    lines.push(Line::raw(""));

    if state.repo.busy {
        lines.push(Line::styled("Working...", Style::default().fg(theme.accent)));
    } else if !state.repo.output.is_empty() {
        for out_line in state.repo.output.lines() {
            lines.push(Line::raw(out_line));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
