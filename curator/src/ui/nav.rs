//! Left navigator panel: dataset list or PR list depending on the tab.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use curator_core::types::{PrStatus, PullRequest, TurnType};

use crate::app::{AppState, PanelFocus, Tab};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the navigator for the active tab.
pub fn render_nav(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Nav;
    match state.tab {
        Tab::Datasets => render_dataset_list(frame, area, is_focused, state, theme),
        Tab::PullRequests => render_pr_list(frame, area, is_focused, state, theme),
        Tab::Repository => render_repo_actions(frame, area, is_focused, theme),
    }
}

fn render_dataset_list(
    frame: &mut Frame,
    area: Rect,
    is_focused: bool,
    state: &mut AppState,
    theme: &Theme,
) {
    let block = panel_block("Datasets", is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if state.datasets.is_empty() {
        let msg = if state.datasets_loading {
            "Loading datasets..."
        } else {
            "No datasets found."
        };
        frame.render_widget(List::new([ListItem::new(Line::raw(msg))]), inner);
        return;
    }

    let items: Vec<ListItem> = state
        .datasets
        .iter()
        .map(|d| {
            let tag = match d.turn_type {
                TurnType::MultiTurn => "[mt] ",
                TurnType::SingleTurn => "[st] ",
            };
            ListItem::new(Line::from(vec![
                Span::styled(tag, Style::default().fg(theme.dim)),
                Span::raw(d.name.clone()),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, inner, &mut state.dataset_list_state);
}

fn render_pr_list(
    frame: &mut Frame,
    area: Rect,
    is_focused: bool,
    state: &mut AppState,
    theme: &Theme,
) {
    let block = panel_block("Pull Requests", is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if state.prs.is_empty() {
        let msg = if state.prs_loading {
            "Loading pull requests..."
        } else {
            "No pull requests."
        };
        frame.render_widget(List::new([ListItem::new(Line::raw(msg))]), inner);
        return;
    }

    let items: Vec<ListItem> = state
        .prs
        .iter()
        .map(|pr| pr_row(pr, theme))
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, inner, &mut state.pr_list_state);
}

/// Two-line PR row: status badge + dataset path, then author and date.
fn pr_row<'a>(pr: &PullRequest, theme: &Theme) -> ListItem<'a> {
    let badge_color = match pr.status {
        PrStatus::Open => theme.status_open,
        PrStatus::Merged => theme.status_merged,
        PrStatus::Rejected => theme.status_rejected,
    };
    let header = Line::from(vec![
        Span::styled(
            format!("[{}] ", pr.status.label()),
            Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(pr.dataset_path.clone()),
    ]);
    let detail = Line::from(Span::styled(
        format!("    {} on {}", pr.username, pr.created_at),
        Style::default().fg(theme.dim),
    ));
    ListItem::new(vec![header, detail])
}

fn render_repo_actions(frame: &mut Frame, area: Rect, is_focused: bool, theme: &Theme) {
    let block = panel_block("Repository", is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let hint = Style::default().fg(theme.dim);
    let items = [
        ListItem::new(Line::from(vec![
            Span::raw("s  "),
            Span::styled("sync main from remote", hint),
        ])),
        ListItem::new(Line::from(vec![
            Span::raw("p  "),
            Span::styled("push main to remote", hint),
        ])),
        ListItem::new(Line::from(vec![
            Span::raw("e  "),
            Span::styled("edit remote URL", hint),
        ])),
    ];
    frame.render_widget(List::new(items), inner);
}
