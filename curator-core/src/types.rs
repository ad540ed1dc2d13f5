use serde::{Deserialize, Serialize};

/// A proposal to replace all or part of an upstream dataset file with the
/// contents of a contributor's fork.
///
/// Created by a contributor once their fork diverges; mutated only by an
/// admin merge or reject. PRs are never deleted, so every id stays valid
/// for the lifetime of the backend store.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Opaque backend identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Path of the affected dataset file, e.g. `multi-turn/coding.json`.
    pub dataset_path: String,
    /// Username of the contributor who opened the PR.
    pub username: String,
    /// Free-text description entered at creation time.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp as reported by the backend.
    pub created_at: String,
    pub status: PrStatus,
}

/// PR lifecycle status. Transitions are one-directional and terminal:
/// `Open -> Merged` or `Open -> Rejected`, nothing leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStatus {
    Open,
    Merged,
    Rejected,
}

impl PrStatus {
    /// Whether the PR can still be merged or rejected.
    ///
    /// The UI hides every open-only control (review submit, merge, reject)
    /// once this returns `false`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, PrStatus::Open)
    }

    /// Lowercase label matching the wire representation.
    pub fn label(self) -> &'static str {
        match self {
            PrStatus::Open => "open",
            PrStatus::Merged => "merged",
            PrStatus::Rejected => "rejected",
        }
    }
}

/// One unit of difference between a fork and upstream, at item granularity.
///
/// Produced entirely by the backend diff endpoint and immutable once
/// fetched. `index` is the item's position in the dataset sequence — stable
/// for the duration of one review session, not across dataset mutations.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiffEntry {
    Added {
        index: usize,
        content: DatasetItem,
    },
    Removed {
        index: usize,
        content: DatasetItem,
    },
    Modified {
        index: usize,
        old_content: DatasetItem,
        new_content: DatasetItem,
    },
}

impl DiffEntry {
    pub fn index(&self) -> usize {
        match self {
            DiffEntry::Added { index, .. }
            | DiffEntry::Removed { index, .. }
            | DiffEntry::Modified { index, .. } => *index,
        }
    }

    /// Uppercase tag for entry headers in the review panel.
    pub fn kind_label(&self) -> &'static str {
        match self {
            DiffEntry::Added { .. } => "ADDED",
            DiffEntry::Removed { .. } => "REMOVED",
            DiffEntry::Modified { .. } => "MODIFIED",
        }
    }
}

/// The full comparison for one PR as returned by the diff endpoint.
///
/// Entry order is whatever the backend produced; the client preserves it
/// for display and never resorts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiffResult {
    pub total_changes: usize,
    pub diffs: Vec<DiffEntry>,
}

impl DiffResult {
    /// Indices of every entry, in display order.
    pub fn indices(&self) -> Vec<usize> {
        self.diffs.iter().map(DiffEntry::index).collect()
    }
}

/// One conversational sample: an ordered message sequence plus optional
/// attribution metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetItem {
    pub messages: Vec<Message>,
    /// Username of the last editor. Written by the client on item edits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
}

/// A single dialogue turn.
///
/// `thinking` presence is meaningful: `None` and `Some("")` serialize
/// differently and the backend treats them differently, so the field is
/// skipped entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A dataset file visible to the current user.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetInfo {
    /// `{turn_type}/{filename}`, the key used by every dataset endpoint.
    pub path: String,
    /// Human-readable name derived from the filename.
    pub name: String,
    #[serde(rename = "type")]
    pub turn_type: TurnType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TurnType {
    #[serde(rename = "multi-turn")]
    MultiTurn,
    #[serde(rename = "single-turn")]
    SingleTurn,
}

impl TurnType {
    pub fn label(self) -> &'static str {
        match self {
            TurnType::MultiTurn => "multi-turn",
            TurnType::SingleTurn => "single-turn",
        }
    }
}

/// Dataset content as returned by the fork-preferring fetch.
///
/// `has_changes` is absent from some backend responses; absent means the
/// fork (if any) matches upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetContent {
    pub content: Vec<DatasetItem>,
    #[serde(default)]
    pub is_fork: bool,
    #[serde(default)]
    pub has_changes: bool,
}
