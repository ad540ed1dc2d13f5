//! Full-screen help overlay listing every keybinding.

use ratatui::{
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{centered_rect, inner_rect};

/// Renders the help overlay on top of all panels. `Clear` erases the
/// panels underneath first.
pub fn render_help_overlay(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = centered_rect(64, 26, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title("Help")
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(theme.border_active))
        .merge_borders(MergeStrategy::Fuzzy);
    frame.render_widget(block, area);

    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(desc.to_owned()),
        ])
    };
    let section = |title: &str| {
        Line::styled(
            title.to_owned(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        section("General"),
        key("Tab", "next tab"),
        key("h / l", "switch panel focus"),
        key("j / k", "scroll down / up"),
        key("g / G", "jump to top / bottom"),
        key("Ctrl-d/u", "half page down / up"),
        key("Ctrl-f/b", "full page down / up"),
        key("r", "reload the active tab"),
        key("?", "toggle this help"),
        key("q", "quit"),
        Line::raw(""),
        section("Datasets"),
        key("Enter", "open the selected dataset"),
        key("n / p", "next / previous item page"),
        key("e", "edit the dataset JSON (autosaves to your fork)"),
        key("P", "propose a pull request from your fork"),
        Line::raw(""),
        section("Pull requests"),
        key("Enter", "open the diff for review"),
        key("Space", "toggle acceptance of the entry under the cursor"),
        key("[ / ]", "previous / next diff entry"),
        key("s", "submit the accepted subset"),
        key("m / x", "merge / reject the whole PR (asks first)"),
        key("Esc", "close the review"),
        Line::raw(""),
        section("Repository"),
        key("s / p", "sync / push main"),
        key("e", "edit the remote URL"),
    ];

    let inner = inner_rect(area);
    frame.render_widget(
        Paragraph::new(lines).scroll((state.help_scroll, 0)),
        inner,
    );
}
