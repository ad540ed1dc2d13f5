//! Modal dialog renderer.
//!
//! One renderer keyed by the `ModalRequest` variant: confirmations draw a
//! yes/no prompt, inputs draw the live buffer with a hardware cursor.

use ratatui::{
    layout::Position,
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
    Frame,
};

use crate::app::{AfterDiscard, ModalRequest};
use crate::theme::Theme;
use crate::ui::layout::{centered_rect, inner_rect};

pub fn render_modal(frame: &mut Frame, modal: &ModalRequest, theme: &Theme) {
    match modal {
        ModalRequest::ConfirmMerge { pr_id } => render_confirm(
            frame,
            "Merge pull request",
            &format!("Merge every change of PR {}? This cannot be undone.", pr_id),
            theme,
        ),
        ModalRequest::ConfirmReject { pr_id } => render_confirm(
            frame,
            "Reject pull request",
            &format!("Reject PR {}? This cannot be undone.", pr_id),
            theme,
        ),
        ModalRequest::ConfirmDiscard { then } => {
            let body = match then {
                AfterDiscard::LeaveEditor => "Discard unsaved edits?",
                AfterDiscard::Quit => "Discard unsaved edits and quit?",
            };
            render_confirm(frame, "Unsaved changes", body, theme)
        }
        ModalRequest::PrDescription { dataset_path, buffer } => render_input(
            frame,
            "New pull request",
            &format!("Description for changes to {}:", dataset_path),
            buffer,
            theme,
        ),
        ModalRequest::EditRemote { buffer } => {
            render_input(frame, "Edit remote", "Remote repository URL:", buffer, theme)
        }
    }
}

fn modal_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::bordered()
        .title(title)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(theme.border_active))
        .merge_borders(MergeStrategy::Fuzzy)
}

fn render_confirm(frame: &mut Frame, title: &str, body: &str, theme: &Theme) {
    let area = centered_rect(60, 6, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(modal_block(title, theme), area);

    let inner = inner_rect(area);
    let lines = vec![
        Line::raw(body.to_owned()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("y", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" confirm   ", Style::default().fg(theme.dim)),
            Span::styled("n/Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" cancel", Style::default().fg(theme.dim)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_input(frame: &mut Frame, title: &str, prompt: &str, buffer: &str, theme: &Theme) {
    let area = centered_rect(70, 7, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(modal_block(title, theme), area);

    let inner = inner_rect(area);
    let lines = vec![
        Line::styled(prompt.to_owned(), Style::default().fg(theme.dim)),
        Line::raw(""),
        Line::raw(buffer.to_owned()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" submit   ", Style::default().fg(theme.dim)),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" cancel", Style::default().fg(theme.dim)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    // Place the hardware cursor at the end of the input buffer.
    let col = buffer.chars().count() as u16;
    if inner.width > 0 {
        frame.set_cursor_position(Position {
            x: (inner.x + col).min(inner.x + inner.width - 1),
            y: inner.y + 2,
        });
    }
}
