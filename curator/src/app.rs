//! Central application state for curator.
//!
//! This module owns all mutable UI state: the active tab, panel focus,
//! loaded datasets and PRs, the open review session, the JSON editor, the
//! modal/toast queues, and every per-operation in-flight flag. No ratatui
//! rendering logic lives here — `app.rs` is pure state read by the render
//! module and mutated by the keybinding dispatcher and the API outcome
//! applier.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;

use curator_core::error::ApiError;
use curator_core::types::{DatasetInfo, DatasetItem, PullRequest};

use crate::api::types::{ApiOutcome, ApiRequest};
use crate::review::ReviewState;
use crate::theme::Theme;

/// Quiet period after the last editor keystroke before the autosave fires.
pub const AUTOSAVE_DELAY: Duration = Duration::from_secs(2);
/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(4);
/// Dataset items shown per page in the browser.
pub const ITEMS_PER_PAGE: usize = 10;

/// Top-level tabs. Activation is explicit: switching calls
/// [`AppState::activate_tab`], which issues that tab's load request
/// exactly once per activation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Datasets,
    PullRequests,
    Repository,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Datasets => Tab::PullRequests,
            Tab::PullRequests => Tab::Repository,
            Tab::Repository => Tab::Datasets,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Datasets => "Datasets",
            Tab::PullRequests => "Pull Requests",
            Tab::Repository => "Repository",
        }
    }
}

/// Input mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode (default).
    #[default]
    Normal,
    /// Raw JSON editing of the selected dataset.
    JsonEdit,
    /// Full-screen help overlay.
    HelpOverlay,
}

/// Which panel currently has keyboard focus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left navigator (dataset list or PR list, depending on tab).
    #[default]
    Nav,
    /// Main content panel.
    Content,
}

/// What happens after the user confirms discarding unsaved edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterDiscard {
    LeaveEditor,
    Quit,
}

/// One pending modal, rendered by a single component keyed by variant.
///
/// Confirmations for the irreversible PR transitions live here so the
/// underlying network call is unreachable without passing through
/// [`AppState::confirm_modal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalRequest {
    /// Merge every change of an open PR. Irreversible.
    ConfirmMerge { pr_id: String },
    /// Reject an open PR outright. Irreversible.
    ConfirmReject { pr_id: String },
    /// Throw away unsaved editor changes, then continue with `then`.
    ConfirmDiscard { then: AfterDiscard },
    /// Text input for a new PR's description.
    PrDescription {
        dataset_path: String,
        buffer: String,
    },
    /// Text input for the git remote URL.
    EditRemote { buffer: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification shown in the status bar until it expires.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// The dataset currently shown in the content panel.
#[derive(Debug, Clone)]
pub struct DatasetView {
    pub info: DatasetInfo,
    pub items: Vec<DatasetItem>,
    pub is_fork: bool,
    pub has_changes: bool,
    /// Zero-based page into `items` (ITEMS_PER_PAGE per page).
    pub page: usize,
    pub scroll: usize,
}

impl DatasetView {
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(ITEMS_PER_PAGE).max(1)
    }

    pub fn page_items(&self) -> &[DatasetItem] {
        let start = self.page * ITEMS_PER_PAGE;
        let end = (start + ITEMS_PER_PAGE).min(self.items.len());
        &self.items[start.min(self.items.len())..end]
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            self.scroll = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.scroll = 0;
        }
    }
}

/// Raw JSON editor over the selected dataset's content.
///
/// The buffer is plain lines with a (row, col) char cursor. Every edit
/// marks the buffer dirty and re-arms the autosave deadline; an explicit
/// save or leaving the editor cancels it.
#[derive(Debug)]
pub struct EditorState {
    /// Dataset path the buffer belongs to.
    pub path: String,
    pub lines: Vec<String>,
    pub cursor_row: usize,
    /// Char (not byte) offset within the cursor row.
    pub cursor_col: usize,
    pub dirty: bool,
    /// When set, the autosave fires once this instant passes.
    pub save_deadline: Option<Instant>,
    pub saving: bool,
    pub scroll: usize,
}

impl EditorState {
    pub fn new(path: String, text: &str) -> Self {
        let lines = if text.is_empty() {
            vec![String::new()]
        } else {
            text.lines().map(str::to_owned).collect()
        };
        Self {
            path,
            lines,
            cursor_row: 0,
            cursor_col: 0,
            dirty: false,
            save_deadline: None,
            saving: false,
            scroll: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn byte_col(&self) -> usize {
        let line = &self.lines[self.cursor_row];
        line.char_indices()
            .nth(self.cursor_col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    /// Marks the buffer dirty and re-arms the autosave deadline.
    fn touch(&mut self, now: Instant) {
        self.dirty = true;
        self.save_deadline = Some(now + AUTOSAVE_DELAY);
    }

    pub fn insert_char(&mut self, c: char, now: Instant) {
        let byte = self.byte_col();
        self.lines[self.cursor_row].insert(byte, c);
        self.cursor_col += 1;
        self.touch(now);
    }

    pub fn insert_newline(&mut self, now: Instant) {
        let byte = self.byte_col();
        let rest = self.lines[self.cursor_row].split_off(byte);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.touch(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let byte = self.byte_col();
            self.lines[self.cursor_row].remove(byte);
            self.touch(now);
        } else if self.cursor_row > 0 {
            let removed = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
            self.lines[self.cursor_row].push_str(&removed);
            self.touch(now);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_row) {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }
}

/// Repository tab state: remote URL plus the last sync/push output.
#[derive(Debug, Default)]
pub struct RepoView {
    pub remote_url: String,
    pub output: String,
    /// True while a git config/sync/push request is in flight.
    pub busy: bool,
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub mode: Mode,
    pub tab: Tab,
    pub focus: PanelFocus,
    pub modal: Option<ModalRequest>,
    pub toast: Option<Toast>,
    pub help_scroll: u16,

    /// Send half of the API worker's request channel. `None` only in
    /// tests that assert no request was issued.
    pub api_tx: Option<UnboundedSender<ApiRequest>>,

    pub datasets: Vec<DatasetInfo>,
    pub datasets_loading: bool,
    pub dataset_list_state: ListState,
    pub dataset: Option<DatasetView>,
    pub dataset_loading: bool,
    /// Whole-view load failure, rendered as an inline error panel.
    pub dataset_error: Option<String>,
    pub editor: Option<EditorState>,

    pub prs: Vec<PullRequest>,
    pub prs_loading: bool,
    pub pr_list_state: ListState,
    pub review: Option<ReviewState>,
    pub diff_loading: bool,
    /// Review session counter. Bumped on every diff open and close;
    /// outcomes carrying an older value are dropped as stale.
    pub review_seq: u64,
    /// Guards whole-merge / reject while one is in flight.
    pub pr_action_in_flight: bool,

    pub repo: RepoView,

    /// Inner panel heights cached after each render, for page scrolling.
    pub nav_viewport_height: u16,
    pub content_viewport_height: u16,
    /// Outer panel rects `[nav, content]` cached after each render, for
    /// click-to-focus hit testing.
    pub panel_rects: [Rect; 2],
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            tab: Tab::default(),
            focus: PanelFocus::default(),
            modal: None,
            toast: None,
            help_scroll: 0,
            api_tx: None,
            datasets: Vec::new(),
            datasets_loading: false,
            dataset_list_state: ListState::default(),
            dataset: None,
            dataset_loading: false,
            dataset_error: None,
            editor: None,
            prs: Vec::new(),
            prs_loading: false,
            pr_list_state: ListState::default(),
            review: None,
            diff_loading: false,
            review_seq: 0,
            pr_action_in_flight: false,
            repo: RepoView::default(),
            nav_viewport_height: 0,
            content_viewport_height: 0,
            panel_rects: [Rect::default(); 2],
        }
    }
}

impl AppState {
    fn send(&self, request: ApiRequest) {
        if let Some(tx) = &self.api_tx {
            let _ = tx.send(request);
        }
    }

    pub fn toast_success(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            kind: ToastKind::Success,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    pub fn toast_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            kind: ToastKind::Error,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    // -----------------------------------------------------------------
    // Tabs
    // -----------------------------------------------------------------

    /// Switches to `tab` and issues its load request. This is the only
    /// place tab data loads are triggered, so each activation loads
    /// exactly once.
    pub fn activate_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.focus = PanelFocus::Nav;
        match tab {
            Tab::Datasets => {
                self.datasets_loading = true;
                self.send(ApiRequest::ListDatasets);
            }
            Tab::PullRequests => {
                self.prs_loading = true;
                self.send(ApiRequest::ListPrs);
            }
            Tab::Repository => {
                self.repo.busy = true;
                self.send(ApiRequest::GetGitRemote);
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.activate_tab(self.tab.next());
    }

    // -----------------------------------------------------------------
    // Datasets
    // -----------------------------------------------------------------

    pub fn selected_dataset(&self) -> Option<&DatasetInfo> {
        self.dataset_list_state
            .selected()
            .and_then(|i| self.datasets.get(i))
    }

    /// Loads the navigator-selected dataset into the content panel.
    pub fn open_selected_dataset(&mut self) {
        let Some(info) = self.selected_dataset().cloned() else {
            return;
        };
        self.dataset_loading = true;
        self.dataset_error = None;
        self.focus = PanelFocus::Content;
        self.send(ApiRequest::FetchDataset { path: info.path });
    }

    /// Opens the raw JSON editor over the loaded dataset.
    pub fn start_editor(&mut self) {
        let Some(view) = &self.dataset else {
            return;
        };
        let text = serde_json::to_string_pretty(&view.items).unwrap_or_default();
        self.editor = Some(EditorState::new(view.info.path.clone(), &text));
        self.mode = Mode::JsonEdit;
    }

    /// Validates the editor buffer and sends it to the user's fork.
    ///
    /// Invalid JSON never leaves the client: the error is reported locally
    /// and the buffer (with the pending deadline cleared) is preserved so
    /// the user can fix and retry.
    pub fn save_editor(&mut self) {
        let Some(editor) = &mut self.editor else {
            return;
        };
        if editor.saving {
            return;
        }
        editor.save_deadline = None;
        let text = editor.text();
        let value: serde_json::Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                self.toast_error(format!("Invalid JSON: {}", e));
                return;
            }
        };
        // Shape validation: the backend stores whatever array it is given,
        // so anything that does not decode as items must be stopped here.
        if let Err(e) = serde_json::from_value::<Vec<DatasetItem>>(value.clone()) {
            self.toast_error(format!("Invalid dataset: {}", e));
            return;
        }
        editor.saving = true;
        editor.dirty = false;
        let path = editor.path.clone();
        self.send(ApiRequest::SaveFork {
            path,
            content: value,
        });
    }

    /// Leaves the editor, asking for confirmation when edits are unsaved.
    pub fn request_leave_editor(&mut self) {
        match &self.editor {
            Some(editor) if editor.dirty => {
                self.modal = Some(ModalRequest::ConfirmDiscard {
                    then: AfterDiscard::LeaveEditor,
                });
            }
            Some(_) => {
                self.editor = None;
                self.mode = Mode::Normal;
            }
            None => {}
        }
    }

    /// Opens the PR-description input for the loaded dataset.
    ///
    /// The backend rejects PRs for datasets without fork changes; that
    /// check stays server-side and surfaces as a toast.
    pub fn request_create_pr(&mut self) {
        let Some(view) = &self.dataset else {
            return;
        };
        self.modal = Some(ModalRequest::PrDescription {
            dataset_path: view.info.path.clone(),
            buffer: String::new(),
        });
    }

    // -----------------------------------------------------------------
    // Review controller
    // -----------------------------------------------------------------

    pub fn selected_pr(&self) -> Option<&PullRequest> {
        self.pr_list_state.selected().and_then(|i| self.prs.get(i))
    }

    /// Fetches the diff for `pr` and starts a new review session. Review
    /// is an open-only control: terminal PRs have nothing left to decide,
    /// so this is a no-op for them.
    ///
    /// Bumping `review_seq` here makes any in-flight response for a
    /// previously opened diff stale.
    pub fn open_diff(&mut self, pr: &PullRequest) {
        if pr.status.is_terminal() {
            return;
        }
        self.review_seq += 1;
        self.diff_loading = true;
        self.send(ApiRequest::FetchDiff {
            pr_id: pr.id.clone(),
            seq: self.review_seq,
        });
    }

    /// Abandons the current review session. Any response still in flight
    /// for it (including a submission) will be dropped on arrival.
    pub fn close_review(&mut self) {
        self.review = None;
        self.review_seq += 1;
        self.diff_loading = false;
    }

    /// Submits the accepted subset of the open review. No-op while a
    /// submission is already in flight or the diff has no entries.
    pub fn submit_merge(&mut self) {
        let Some(review) = &mut self.review else {
            return;
        };
        if !review.can_submit() {
            return;
        }
        review.submitting = true;
        let request = ApiRequest::ProcessPr {
            pr_id: review.pr_id.clone(),
            seq: review.seq,
            accepted: review.selection.snapshot(),
        };
        self.send(request);
    }

    /// Asks for confirmation before merging the whole PR. Only reachable
    /// for open PRs; terminal PRs expose no merge control.
    pub fn request_merge_whole(&mut self, pr: &PullRequest) {
        if pr.status.is_terminal() || self.pr_action_in_flight {
            return;
        }
        self.modal = Some(ModalRequest::ConfirmMerge {
            pr_id: pr.id.clone(),
        });
    }

    /// Asks for confirmation before rejecting the PR outright.
    pub fn request_reject_whole(&mut self, pr: &PullRequest) {
        if pr.status.is_terminal() || self.pr_action_in_flight {
            return;
        }
        self.modal = Some(ModalRequest::ConfirmReject {
            pr_id: pr.id.clone(),
        });
    }

    // -----------------------------------------------------------------
    // Modals
    // -----------------------------------------------------------------

    /// Confirms the pending modal. Returns `true` when the application
    /// should quit (discard-and-quit path).
    pub fn confirm_modal(&mut self) -> bool {
        match self.modal.take() {
            Some(ModalRequest::ConfirmMerge { pr_id }) => {
                self.pr_action_in_flight = true;
                self.send(ApiRequest::MergePr { pr_id });
            }
            Some(ModalRequest::ConfirmReject { pr_id }) => {
                self.pr_action_in_flight = true;
                self.send(ApiRequest::RejectPr { pr_id });
            }
            Some(ModalRequest::ConfirmDiscard { then }) => {
                self.editor = None;
                self.mode = Mode::Normal;
                if then == AfterDiscard::Quit {
                    return true;
                }
            }
            Some(ModalRequest::PrDescription {
                dataset_path,
                buffer,
            }) => {
                self.send(ApiRequest::CreatePr {
                    dataset_path,
                    description: buffer,
                });
            }
            Some(ModalRequest::EditRemote { buffer }) => {
                self.repo.busy = true;
                self.send(ApiRequest::SetGitRemote { url: buffer });
            }
            None => {}
        }
        false
    }

    pub fn cancel_modal(&mut self) {
        self.modal = None;
    }

    /// Quit entry point: confirms first when unsaved edits exist.
    /// Returns `true` when the application should quit immediately.
    pub fn request_quit(&mut self) -> bool {
        if matches!(&self.editor, Some(e) if e.dirty) {
            self.modal = Some(ModalRequest::ConfirmDiscard {
                then: AfterDiscard::Quit,
            });
            return false;
        }
        true
    }

    // -----------------------------------------------------------------
    // Ticks
    // -----------------------------------------------------------------

    /// Logic tick: expires the toast and fires the debounced autosave.
    pub fn handle_tick(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if now >= toast.expires_at {
                self.toast = None;
            }
        }
        let due = matches!(
            &self.editor,
            Some(e) if !e.saving && e.save_deadline.is_some_and(|d| now >= d)
        );
        if due {
            self.save_editor();
        }
    }

    // -----------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------

    /// Scrolls the focused panel down by `lines` rows.
    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Nav => match self.tab {
                Tab::Datasets => self.dataset_list_state.scroll_down_by(lines),
                Tab::PullRequests => self.pr_list_state.scroll_down_by(lines),
                Tab::Repository => {}
            },
            PanelFocus::Content => {
                if let Some(review) = &mut self.review {
                    review.scroll = review.scroll.saturating_add(lines as usize);
                } else if let Some(view) = &mut self.dataset {
                    view.scroll = view.scroll.saturating_add(lines as usize);
                }
            }
        }
    }

    /// Scrolls the focused panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Nav => match self.tab {
                Tab::Datasets => self.dataset_list_state.scroll_up_by(lines),
                Tab::PullRequests => self.pr_list_state.scroll_up_by(lines),
                Tab::Repository => {}
            },
            PanelFocus::Content => {
                if let Some(review) = &mut self.review {
                    review.scroll = review.scroll.saturating_sub(lines as usize);
                } else if let Some(view) = &mut self.dataset {
                    view.scroll = view.scroll.saturating_sub(lines as usize);
                }
            }
        }
    }

    pub fn half_page_down(&mut self) {
        let half = match self.focus {
            PanelFocus::Nav => self.nav_viewport_height / 2,
            PanelFocus::Content => self.content_viewport_height / 2,
        };
        self.scroll_down(half.max(1));
    }

    pub fn half_page_up(&mut self) {
        let half = match self.focus {
            PanelFocus::Nav => self.nav_viewport_height / 2,
            PanelFocus::Content => self.content_viewport_height / 2,
        };
        self.scroll_up(half.max(1));
    }

    pub fn full_page_down(&mut self) {
        let page = match self.focus {
            PanelFocus::Nav => self.nav_viewport_height,
            PanelFocus::Content => self.content_viewport_height,
        };
        self.scroll_down(page.max(1));
    }

    pub fn full_page_up(&mut self) {
        let page = match self.focus {
            PanelFocus::Nav => self.nav_viewport_height,
            PanelFocus::Content => self.content_viewport_height,
        };
        self.scroll_up(page.max(1));
    }

    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Nav => match self.tab {
                Tab::Datasets => self.dataset_list_state.select_first(),
                Tab::PullRequests => self.pr_list_state.select_first(),
                Tab::Repository => {}
            },
            PanelFocus::Content => {
                if let Some(review) = &mut self.review {
                    review.scroll = 0;
                } else if let Some(view) = &mut self.dataset {
                    view.scroll = 0;
                }
            }
        }
    }

    pub fn scroll_bottom(&mut self) {
        let viewport = self.content_viewport_height as usize;
        match self.focus {
            PanelFocus::Nav => match self.tab {
                Tab::Datasets => self.dataset_list_state.select_last(),
                Tab::PullRequests => self.pr_list_state.select_last(),
                Tab::Repository => {}
            },
            PanelFocus::Content => {
                if let Some(review) = &mut self.review {
                    review.scroll = review.lines.len().saturating_sub(viewport);
                } else if let Some(view) = &mut self.dataset {
                    // Clamped during render against the page's line count.
                    view.scroll = usize::MAX / 2;
                }
            }
        }
    }

    // -----------------------------------------------------------------
    // API outcomes
    // -----------------------------------------------------------------

    /// Surfaces an error and, for backend rejections, refreshes the PR
    /// list so stale local state is corrected (a late "already merged"
    /// answer is authoritative).
    fn surface_pr_error(&mut self, error: &ApiError) {
        let rejection = error.is_rejection();
        self.toast_error(error.to_string());
        if rejection {
            self.prs_loading = true;
            self.send(ApiRequest::ListPrs);
        }
    }

    /// Applies one worker result to the state. Every arm clears its
    /// in-flight flag on both the success and failure path.
    pub fn apply_api_outcome(&mut self, outcome: ApiOutcome, theme: &Theme) {
        match outcome {
            ApiOutcome::Datasets(result) => {
                self.datasets_loading = false;
                match result {
                    Ok(datasets) => {
                        self.datasets = datasets;
                        if self.dataset_list_state.selected().is_none()
                            && !self.datasets.is_empty()
                        {
                            self.dataset_list_state.select(Some(0));
                        }
                    }
                    Err(e) => self.toast_error(e.to_string()),
                }
            }
            ApiOutcome::Dataset { path, result } => {
                self.dataset_loading = false;
                match result {
                    Ok(content) => {
                        let Some(info) =
                            self.datasets.iter().find(|d| d.path == path).cloned()
                        else {
                            // The listing changed while the fetch was in
                            // flight and no longer names this path.
                            self.dataset_error = Some(format!(
                                "{} is no longer in the dataset list; reload with r",
                                path
                            ));
                            return;
                        };
                        self.dataset_error = None;
                        self.dataset = Some(DatasetView {
                            info,
                            items: content.content,
                            is_fork: content.is_fork,
                            has_changes: content.has_changes,
                            page: 0,
                            scroll: 0,
                        });
                    }
                    Err(e) => {
                        self.dataset_error = Some(e.to_string());
                    }
                }
            }
            ApiOutcome::ForkSaved { path, result } => {
                if let Some(editor) = &mut self.editor {
                    if editor.path == path {
                        editor.saving = false;
                    }
                }
                match result {
                    Ok(()) => {
                        // The saved buffer is now the fork's content. A
                        // parse failure here means the buffer was edited
                        // while the save was in flight; those edits re-arm
                        // the autosave deadline, so the next save refreshes
                        // the view.
                        let mut items_stale = false;
                        if let (Some(view), Some(editor)) = (&mut self.dataset, &self.editor)
                        {
                            if view.info.path == path {
                                view.is_fork = true;
                                view.has_changes = true;
                                match serde_json::from_str::<Vec<DatasetItem>>(&editor.text())
                                {
                                    Ok(items) => view.items = items,
                                    Err(_) => items_stale = true,
                                }
                            }
                        }
                        if items_stale {
                            self.toast_success("Saved to your fork (view pending edits)");
                        } else {
                            self.toast_success("Saved to your fork");
                        }
                    }
                    Err(e) => self.toast_error(e.to_string()),
                }
            }
            ApiOutcome::PrCreated(result) => match result {
                Ok(pr) => {
                    self.toast_success(format!("Pull request created for {}", pr.dataset_path))
                }
                Err(e) => self.toast_error(e.to_string()),
            },
            ApiOutcome::Prs(result) => {
                self.prs_loading = false;
                match result {
                    Ok(prs) => {
                        self.prs = prs;
                        if self.pr_list_state.selected().is_none() && !self.prs.is_empty() {
                            self.pr_list_state.select(Some(0));
                        }
                    }
                    Err(e) => self.toast_error(e.to_string()),
                }
            }
            ApiOutcome::Diff { pr_id, seq, result } => {
                // Stale responses belong to a review the user already left.
                if seq != self.review_seq {
                    return;
                }
                self.diff_loading = false;
                match result {
                    Ok(diff) => {
                        self.review = Some(ReviewState::new(pr_id, seq, diff, theme));
                        self.focus = PanelFocus::Content;
                    }
                    // Failure leaves the prior view state untouched.
                    Err(e) => self.toast_error(e.to_string()),
                }
            }
            ApiOutcome::PrProcessed {
                seq,
                accepted,
                result,
            } => {
                if seq != self.review_seq {
                    return;
                }
                match result {
                    Ok(()) => {
                        self.toast_success(format!(
                            "PR processed, {} item(s) accepted",
                            accepted
                        ));
                        self.close_review();
                        self.prs_loading = true;
                        self.send(ApiRequest::ListPrs);
                    }
                    Err(e) => {
                        // Review stays open so the reviewer can retry
                        // without refetching.
                        if let Some(review) = &mut self.review {
                            review.submitting = false;
                        }
                        self.surface_pr_error(&e);
                    }
                }
            }
            ApiOutcome::PrMerged(result) => {
                self.pr_action_in_flight = false;
                match result {
                    Ok(()) => {
                        self.toast_success("Pull request merged");
                        self.prs_loading = true;
                        self.send(ApiRequest::ListPrs);
                    }
                    Err(e) => self.surface_pr_error(&e),
                }
            }
            ApiOutcome::PrRejected(result) => {
                self.pr_action_in_flight = false;
                match result {
                    Ok(()) => {
                        self.toast_success("Pull request rejected");
                        self.prs_loading = true;
                        self.send(ApiRequest::ListPrs);
                    }
                    Err(e) => self.surface_pr_error(&e),
                }
            }
            ApiOutcome::GitRemote(result) => {
                self.repo.busy = false;
                match result {
                    Ok(url) => self.repo.remote_url = url,
                    Err(e) => self.toast_error(e.to_string()),
                }
            }
            ApiOutcome::GitRemoteSaved(result) => {
                self.repo.busy = false;
                match result {
                    Ok(()) => self.toast_success("Remote URL updated"),
                    Err(e) => self.toast_error(e.to_string()),
                }
            }
            ApiOutcome::GitSynced(result) | ApiOutcome::GitPushed(result) => {
                self.repo.busy = false;
                match result {
                    Ok(output) => {
                        self.repo.output = output;
                        self.toast_success("Done");
                    }
                    Err(e) => {
                        self.repo.output = format!("Error: {}", e);
                        self.toast_error(e.to_string());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ApiRequest;
    use curator_core::types::PrStatus;
    use tokio::sync::mpsc;

    fn state_with_channel() -> (AppState, mpsc::UnboundedReceiver<ApiRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = AppState::default();
        state.api_tx = Some(tx);
        (state, rx)
    }

    fn open_pr(id: &str) -> PullRequest {
        serde_json::from_str(&format!(
            r#"{{"_id": "{id}", "dataset_path": "multi-turn/a.json",
                "username": "mira", "created_at": "2025-11-02", "status": "open"}}"#
        ))
        .unwrap()
    }

    fn sample_diff() -> curator_core::types::DiffResult {
        serde_json::from_str(
            r#"{"total_changes": 1, "diffs": [
                {"index": 0, "type": "added",
                 "content": {"messages": [{"role": "user", "content": "c"}]}}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn merge_whole_requires_confirmation() {
        let (mut state, mut rx) = state_with_channel();
        let pr = open_pr("p1");

        state.request_merge_whole(&pr);
        assert!(matches!(
            state.modal,
            Some(ModalRequest::ConfirmMerge { ref pr_id }) if pr_id == "p1"
        ));
        // No network call before confirmation.
        assert!(rx.try_recv().is_err());

        state.confirm_modal();
        assert!(matches!(rx.try_recv(), Ok(ApiRequest::MergePr { pr_id }) if pr_id == "p1"));
        assert!(state.pr_action_in_flight);
    }

    #[test]
    fn cancel_modal_sends_nothing() {
        let (mut state, mut rx) = state_with_channel();
        let pr = open_pr("p1");
        state.request_reject_whole(&pr);
        state.cancel_modal();
        assert!(rx.try_recv().is_err());
        assert!(!state.pr_action_in_flight);
    }

    #[test]
    fn terminal_pr_gets_no_confirm_modal() {
        let (mut state, _rx) = state_with_channel();
        let mut pr = open_pr("p1");
        pr.status = PrStatus::Merged;
        state.request_merge_whole(&pr);
        state.request_reject_whole(&pr);
        assert!(state.modal.is_none());
    }

    #[test]
    fn terminal_pr_cannot_enter_review() {
        let (mut state, mut rx) = state_with_channel();
        let mut pr = open_pr("p1");
        pr.status = PrStatus::Merged;

        state.open_diff(&pr);
        assert!(rx.try_recv().is_err(), "no diff fetch for a terminal PR");
        assert!(!state.diff_loading);
        assert_eq!(state.review_seq, 0, "no review session was started");

        // With no review open, the submit trigger is inert too.
        state.submit_merge();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn submit_merge_is_guarded_while_in_flight() {
        let (mut state, mut rx) = state_with_channel();
        state.review_seq = 1;
        state.review = Some(crate::review::ReviewState::new(
            "p1".into(),
            1,
            sample_diff(),
            &Theme::dark(),
        ));

        state.submit_merge();
        assert!(matches!(rx.try_recv(), Ok(ApiRequest::ProcessPr { .. })));

        // Second trigger while the first is in flight is a no-op.
        state.submit_merge();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn stale_diff_response_is_dropped() {
        let (mut state, _rx) = state_with_channel();
        state.open_diff(&open_pr("p1"));
        let stale_seq = state.review_seq;
        state.open_diff(&open_pr("p2"));

        state.apply_api_outcome(
            ApiOutcome::Diff {
                pr_id: "p1".into(),
                seq: stale_seq,
                result: Ok(sample_diff()),
            },
            &Theme::dark(),
        );
        assert!(state.review.is_none(), "stale diff must not open a review");
        assert!(state.diff_loading, "newer fetch is still pending");
    }

    #[test]
    fn late_submission_for_abandoned_review_is_ignored() {
        let (mut state, mut rx) = state_with_channel();
        state.review_seq = 3;
        state.review = Some(crate::review::ReviewState::new(
            "p1".into(),
            3,
            sample_diff(),
            &Theme::dark(),
        ));
        state.close_review();
        while rx.try_recv().is_ok() {}

        state.apply_api_outcome(
            ApiOutcome::PrProcessed {
                seq: 3,
                accepted: 1,
                result: Ok(()),
            },
            &Theme::dark(),
        );
        assert!(state.toast.is_none(), "abandoned session must stay silent");
        assert!(rx.try_recv().is_err(), "no reload for abandoned session");
    }

    #[test]
    fn failed_submission_keeps_review_open() {
        let (mut state, _rx) = state_with_channel();
        state.review_seq = 1;
        state.review = Some(crate::review::ReviewState::new(
            "p1".into(),
            1,
            sample_diff(),
            &Theme::dark(),
        ));
        state.submit_merge();

        state.apply_api_outcome(
            ApiOutcome::PrProcessed {
                seq: 1,
                accepted: 1,
                result: Err(curator_core::error::ApiError::Backend {
                    status: 400,
                    detail: "PR is not open".into(),
                }),
            },
            &Theme::dark(),
        );
        let review = state.review.as_ref().expect("review stays open for retry");
        assert!(!review.submitting, "in-flight flag cleared on failure");
        assert!(matches!(&state.toast, Some(t) if t.kind == ToastKind::Error));
    }

    #[test]
    fn dataset_for_unlisted_path_reports_an_error() {
        let (mut state, _rx) = state_with_channel();
        let content: curator_core::types::DatasetContent =
            serde_json::from_str(r#"{"content": []}"#).unwrap();

        // The dataset list is empty, so the arriving content has no home.
        state.dataset_loading = true;
        state.apply_api_outcome(
            ApiOutcome::Dataset {
                path: "multi-turn/gone.json".into(),
                result: Ok(content),
            },
            &Theme::dark(),
        );

        assert!(!state.dataset_loading);
        assert!(state.dataset.is_none());
        assert!(
            matches!(&state.dataset_error, Some(e) if e.contains("gone.json")),
            "the panel must explain why nothing loaded"
        );
    }

    #[test]
    fn tab_activation_issues_exactly_one_load() {
        let (mut state, mut rx) = state_with_channel();
        state.activate_tab(Tab::PullRequests);
        assert!(matches!(rx.try_recv(), Ok(ApiRequest::ListPrs)));
        assert!(rx.try_recv().is_err());
        assert!(state.prs_loading);
    }

    #[test]
    fn invalid_json_save_preserves_buffer() {
        let (mut state, mut rx) = state_with_channel();
        state.editor = Some(EditorState::new("multi-turn/a.json".into(), "[{broken"));
        state.save_editor();

        assert!(rx.try_recv().is_err(), "invalid JSON never leaves the client");
        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.text(), "[{broken");
        assert!(editor.save_deadline.is_none(), "deadline cleared until next edit");
        assert!(matches!(&state.toast, Some(t) if t.kind == ToastKind::Error));
    }

    #[test]
    fn non_item_json_save_is_rejected_locally() {
        let (mut state, mut rx) = state_with_channel();
        // Well-formed JSON, but not a list of dataset items.
        state.editor = Some(EditorState::new(
            "multi-turn/a.json".into(),
            r#"[{"foo": 1}]"#,
        ));
        state.save_editor();

        assert!(rx.try_recv().is_err(), "malformed items never reach the backend");
        let editor = state.editor.as_ref().unwrap();
        assert!(!editor.saving);
        assert_eq!(editor.text(), r#"[{"foo": 1}]"#);
        assert!(matches!(&state.toast, Some(t) if t.kind == ToastKind::Error));
    }

    #[test]
    fn autosave_fires_after_quiet_period() {
        let (mut state, mut rx) = state_with_channel();
        let now = Instant::now();
        let mut editor = EditorState::new("multi-turn/a.json".into(), "[]");
        editor.insert_char('\u{20}', now); // arms the deadline
        state.editor = Some(editor);

        state.handle_tick(now + Duration::from_millis(100));
        assert!(rx.try_recv().is_err(), "deadline not reached yet");

        state.handle_tick(now + AUTOSAVE_DELAY + Duration::from_millis(1));
        assert!(matches!(rx.try_recv(), Ok(ApiRequest::SaveFork { .. })));
    }

    #[test]
    fn quit_with_dirty_editor_asks_first() {
        let (mut state, _rx) = state_with_channel();
        let mut editor = EditorState::new("multi-turn/a.json".into(), "[]");
        editor.insert_char('x', Instant::now());
        state.editor = Some(editor);

        assert!(!state.request_quit());
        assert!(matches!(
            state.modal,
            Some(ModalRequest::ConfirmDiscard {
                then: AfterDiscard::Quit
            })
        ));
        assert!(state.confirm_modal(), "confirming discard quits");
    }
}
