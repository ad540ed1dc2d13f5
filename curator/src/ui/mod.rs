//! UI rendering module for curator.
//!
//! Module root for `ui/`; re-exports `render()` as the single entry point
//! called from the event loop's `terminal.draw()` closure. Layout
//! arithmetic lives in `layout.rs`, panel renderers in their own modules,
//! and all key/mouse dispatch in `keybindings.rs`.

mod layout;
pub mod dataset_view;
pub mod help;
pub mod keybindings;
pub mod modal;
pub mod nav;
pub mod repo_view;
pub mod review_view;

use ratatui::Frame;

use crate::app::{AppState, Mode, Tab};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame. Called exactly once per `AppEvent::Render`
/// inside `terminal.draw()` — the only place `terminal.draw()` is called.
///
/// Viewport heights and panel rects are written back into `state` so the
/// next keypress can compute page-scroll distances and click targets. The
/// one-frame lag is imperceptible.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [nav, content, status_bar] = compute_layout(frame);

    state.nav_viewport_height = inner_rect(nav).height;
    state.content_viewport_height = inner_rect(content).height;
    state.panel_rects = [nav, content];

    if nav.width > 0 {
        nav::render_nav(frame, nav, state, theme);
    }

    match state.tab {
        Tab::Datasets => dataset_view::render_dataset(frame, content, state, theme),
        Tab::PullRequests => review_view::render_review(frame, content, state, theme),
        Tab::Repository => repo_view::render_repo(frame, content, state, theme),
    }

    render_status_bar(frame, status_bar, state, theme);

    // Overlays render last so they sit on top of the panels.
    if let Some(modal_request) = &state.modal {
        modal::render_modal(frame, modal_request, theme);
    } else if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, state, theme);
    }
}
