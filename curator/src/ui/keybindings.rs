//! Keybinding dispatcher for curator.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and
//! returns a `KeyAction` telling the event loop whether to continue or
//! quit. Dispatch order: an open modal always consumes the key first,
//! then the current mode's handler runs.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::api::types::ApiRequest;
use crate::app::{AppState, Mode, ModalRequest, PanelFocus, Tab};
use crate::theme::Theme;

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event. Mutates `state` in place; the event loop
/// redraws on the next render tick regardless of the return value.
pub fn handle_key(key: KeyEvent, state: &mut AppState, theme: &Theme) -> KeyAction {
    if state.modal.is_some() {
        return handle_modal(key, state);
    }
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::JsonEdit => handle_json_edit(key, state),
        Mode::Normal => handle_normal(key, state, theme),
    }
}

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

/// Handles keys while a modal is open. Confirmations take y/n; text
/// inputs take printable characters, Backspace, Enter, Esc.
fn handle_modal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let is_input = matches!(
        state.modal,
        Some(ModalRequest::PrDescription { .. }) | Some(ModalRequest::EditRemote { .. })
    );

    if is_input {
        match key.code {
            KeyCode::Enter => {
                if state.confirm_modal() {
                    return KeyAction::Quit;
                }
            }
            KeyCode::Esc => state.cancel_modal(),
            KeyCode::Backspace => {
                if let Some(
                    ModalRequest::PrDescription { buffer, .. }
                    | ModalRequest::EditRemote { buffer },
                ) = &mut state.modal
                {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(
                    ModalRequest::PrDescription { buffer, .. }
                    | ModalRequest::EditRemote { buffer },
                ) = &mut state.modal
                {
                    buffer.push(c);
                }
            }
            _ => {}
        }
        return KeyAction::Continue;
    }

    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if state.confirm_modal() {
                return KeyAction::Quit;
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.cancel_modal(),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState, theme: &Theme) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }
    if let Some(action) = handle_tab_key(key, state, theme) {
        return action;
    }

    match key.code {
        KeyCode::Tab => {
            state.next_tab();
            KeyAction::Continue
        }
        KeyCode::Char('h') => {
            state.focus = PanelFocus::Nav;
            KeyAction::Continue
        }
        KeyCode::Char('l') => {
            state.focus = PanelFocus::Content;
            KeyAction::Continue
        }
        KeyCode::Char('r') => {
            state.activate_tab(state.tab);
            KeyAction::Continue
        }
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }
        KeyCode::Char('q') => {
            if state.request_quit() {
                KeyAction::Quit
            } else {
                KeyAction::Continue
            }
        }
        _ => KeyAction::Continue,
    }
}

/// Handles keys specific to the active tab. Returns `Some` when the key
/// was consumed.
fn handle_tab_key(key: KeyEvent, state: &mut AppState, theme: &Theme) -> Option<KeyAction> {
    match state.tab {
        Tab::Datasets => handle_datasets_key(key, state),
        Tab::PullRequests => handle_prs_key(key, state, theme),
        Tab::Repository => handle_repo_key(key, state),
    }
}

fn handle_datasets_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    match key.code {
        KeyCode::Enter => {
            state.open_selected_dataset();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('e') => {
            state.start_editor();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('P') => {
            state.request_create_pr();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('n') if state.focus == PanelFocus::Content => {
            if let Some(view) = &mut state.dataset {
                view.next_page();
            }
            Some(KeyAction::Continue)
        }
        KeyCode::Char('p') if state.focus == PanelFocus::Content => {
            if let Some(view) = &mut state.dataset {
                view.prev_page();
            }
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

fn handle_prs_key(key: KeyEvent, state: &mut AppState, theme: &Theme) -> Option<KeyAction> {
    match key.code {
        KeyCode::Enter => {
            if let Some(pr) = state.selected_pr().cloned() {
                state.open_diff(&pr);
            }
            Some(KeyAction::Continue)
        }
        KeyCode::Char(' ') => {
            if let Some(review) = &mut state.review {
                review.toggle_at_cursor(theme);
            }
            Some(KeyAction::Continue)
        }
        KeyCode::Char(']') => {
            if let Some(review) = &mut state.review {
                review.next_entry();
            }
            Some(KeyAction::Continue)
        }
        KeyCode::Char('[') => {
            if let Some(review) = &mut state.review {
                review.prev_entry();
            }
            Some(KeyAction::Continue)
        }
        KeyCode::Char('s') => {
            state.submit_merge();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('m') => {
            if let Some(pr) = state.selected_pr().cloned() {
                state.request_merge_whole(&pr);
            }
            Some(KeyAction::Continue)
        }
        KeyCode::Char('x') => {
            if let Some(pr) = state.selected_pr().cloned() {
                state.request_reject_whole(&pr);
            }
            Some(KeyAction::Continue)
        }
        KeyCode::Esc if state.review.is_some() => {
            state.close_review();
            state.focus = PanelFocus::Nav;
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

fn handle_repo_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char('s') if !state.repo.busy => {
            state.repo.busy = true;
            if let Some(tx) = &state.api_tx {
                let _ = tx.send(ApiRequest::GitSync);
            }
            Some(KeyAction::Continue)
        }
        KeyCode::Char('p') if !state.repo.busy => {
            state.repo.busy = true;
            if let Some(tx) = &state.api_tx {
                let _ = tx.send(ApiRequest::GitPush);
            }
            Some(KeyAction::Continue)
        }
        KeyCode::Char('e') => {
            state.modal = Some(ModalRequest::EditRemote {
                buffer: state.repo.remote_url.clone(),
            });
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

/// Handles scroll keys: j / k / g / G and Ctrl combos. Returns `Some`
/// when the key was consumed.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.scroll_down(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.scroll_up(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('g') => {
            state.scroll_top();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('G') => {
            state.scroll_bottom();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('d') if ctrl => {
            state.half_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('u') if ctrl => {
            state.half_page_up();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('f') if ctrl => {
            state.full_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('b') if ctrl => {
            state.full_page_up();
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => {
            state.help_scroll = state.help_scroll.saturating_add(1);
            KeyAction::Continue
        }
        KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
            KeyAction::Continue
        }
        KeyCode::Char('g') => {
            state.help_scroll = 0;
            KeyAction::Continue
        }
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// JsonEdit mode
// ---------------------------------------------------------------------------

/// Handles keys while the JSON editor is open. Esc leaves (asking first
/// when dirty); Ctrl-s saves immediately instead of waiting for the
/// autosave debounce.
fn handle_json_edit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let now = std::time::Instant::now();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            state.request_leave_editor();
            return KeyAction::Continue;
        }
        KeyCode::Char('s') if ctrl => {
            state.save_editor();
            return KeyAction::Continue;
        }
        _ => {}
    }

    let Some(editor) = &mut state.editor else {
        return KeyAction::Continue;
    };
    match key.code {
        KeyCode::Char(c) if !ctrl => editor.insert_char(c, now),
        KeyCode::Enter => editor.insert_newline(now),
        KeyCode::Backspace => editor.backspace(now),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Click-to-focus and scroll-wheel handling. The wheel scrolls 3 lines,
/// matching typical terminal scroll speed.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let pos = Position {
                x: mouse.column,
                y: mouse.row,
            };
            let [nav, content] = state.panel_rects;
            if nav.width > 0 && nav.contains(pos) {
                state.focus = PanelFocus::Nav;
            } else if content.contains(pos) {
                state.focus = PanelFocus::Content;
            }
            KeyAction::Continue
        }
        MouseEventKind::ScrollUp => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_sub(3);
            } else {
                state.scroll_up(3);
            }
            KeyAction::Continue
        }
        MouseEventKind::ScrollDown => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_add(3);
            } else {
                state.scroll_down(3);
            }
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    #[test]
    fn question_mark_opens_help_and_esc_closes() {
        let mut state = AppState::default();
        let theme = Theme::dark();
        handle_key(press('?'), &mut state, &theme);
        assert_eq!(state.mode, Mode::HelpOverlay);
        handle_key(KeyEvent::from(KeyCode::Esc), &mut state, &theme);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn modal_consumes_keys_before_normal_mode() {
        let mut state = AppState::default();
        let theme = Theme::dark();
        state.modal = Some(ModalRequest::ConfirmMerge { pr_id: "p1".into() });
        // 'q' would normally quit; with a modal open it is swallowed.
        let action = handle_key(press('q'), &mut state, &theme);
        assert_eq!(action, KeyAction::Continue);
        assert!(state.modal.is_some());
    }

    #[test]
    fn input_modal_collects_typed_text() {
        let mut state = AppState::default();
        let theme = Theme::dark();
        state.modal = Some(ModalRequest::EditRemote {
            buffer: String::new(),
        });
        for c in "git@host".chars() {
            handle_key(press(c), &mut state, &theme);
        }
        handle_key(KeyEvent::from(KeyCode::Backspace), &mut state, &theme);
        match &state.modal {
            Some(ModalRequest::EditRemote { buffer }) => assert_eq!(buffer, "git@hos"),
            other => panic!("unexpected modal: {:?}", other),
        }
    }

    #[test]
    fn quit_without_dirty_editor_is_immediate() {
        let mut state = AppState::default();
        let theme = Theme::dark();
        assert_eq!(handle_key(press('q'), &mut state, &theme), KeyAction::Quit);
    }
}
