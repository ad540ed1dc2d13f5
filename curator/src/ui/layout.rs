//! Responsive 2-panel layout engine for curator.
//!
//! Pure layout arithmetic, called inside `terminal.draw()` on every render
//! so each frame reflects the current terminal size.
//!
//! # Panel geometry
//!
//! At `>= 80` columns the navigator takes 30% of the width and the content
//! panel the rest. Below 80 columns the navigator collapses and the content
//! panel fills the full width (the navigator stays reachable via focus keys
//! once the terminal widens again).
//!
//! `Spacing::Overlap(1)` with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes the adjacent panel borders share one column and merge junction
//! characters.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{AppState, Tab, Toast, ToastKind};
use crate::theme::Theme;

/// Returns `[nav, content, status_bar]` panel `Rect`s for the current frame.
///
/// Valid only within the current draw closure.
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    let term_width = frame.area().width;

    let [main_area, status_bar] = frame
        .area()
        .layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let horizontal = if term_width >= 80 {
        Layout::horizontal([Constraint::Percentage(30), Constraint::Fill(1)])
            .spacing(Spacing::Overlap(1))
    } else {
        Layout::horizontal([Constraint::Length(0), Constraint::Fill(1)])
            .spacing(Spacing::Overlap(1))
    };

    let [nav, content] = main_area.layout(&horizontal);

    [nav, content, status_bar]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border.
///
/// Used to cache viewport heights in `AppState` before panels render, so
/// page-scroll distances are available at keypress time.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin {
        vertical: 1,
        horizontal: 1,
    })
}

/// Builds a bordered `Block` for a panel. Thick border when focused.
///
/// `MergeStrategy::Fuzzy` is required when mixing `Thick` and `Plain`
/// borders; `Exact` produces incorrect junction characters.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused {
        BorderType::Thick
    } else {
        BorderType::Plain
    };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Centred rect for modal dialogs, clamped to the frame.
pub fn centered_rect(width: u16, height: u16, frame_area: Rect) -> Rect {
    let w = width.min(frame_area.width);
    let h = height.min(frame_area.height);
    Rect {
        x: frame_area.x + (frame_area.width - w) / 2,
        y: frame_area.y + (frame_area.height - h) / 2,
        width: w,
        height: h,
    }
}

/// Renders the 1-row status bar: tab indicators on the left, the active
/// toast (if any) on the right of them.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans: Vec<Span> = Vec::new();

    for tab in [Tab::Datasets, Tab::PullRequests, Tab::Repository] {
        let style = if tab == state.tab {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.status_bar_fg)
        };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
        spans.push(Span::raw("|"));
    }
    spans.pop();

    if let Some(Toast {
        message, kind, ..
    }) = &state.toast
    {
        let fg = match kind {
            ToastKind::Success => theme.toast_success,
            ToastKind::Error => theme.toast_error,
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
