//! Request and result types for the API background worker.
//!
//! Every type is fully owned so values can cross the channel boundary and
//! be stored in `AppState` without lifetimes.

use curator_core::error::ApiError;
use curator_core::types::{DatasetContent, DatasetInfo, DiffResult, PullRequest};

/// Commands sent from the UI to the API worker task.
///
/// `seq` on the review requests is the review session counter from
/// `AppState`; it comes back on the outcome so stale responses for an
/// abandoned review can be dropped.
#[derive(Debug)]
pub enum ApiRequest {
    ListDatasets,
    FetchDataset {
        path: String,
    },
    SaveFork {
        path: String,
        content: serde_json::Value,
    },
    CreatePr {
        dataset_path: String,
        description: String,
    },
    ListPrs,
    FetchDiff {
        pr_id: String,
        seq: u64,
    },
    /// Selective merge of the accepted indices only.
    ProcessPr {
        pr_id: String,
        seq: u64,
        accepted: Vec<usize>,
    },
    MergePr {
        pr_id: String,
    },
    RejectPr {
        pr_id: String,
    },
    GetGitRemote,
    SetGitRemote {
        url: String,
    },
    GitSync,
    GitPush,
}

/// Result payload sent back from the worker, one variant per request kind.
///
/// Carried inside `AppEvent::Api(Box<ApiOutcome>)`.
#[derive(Debug)]
pub enum ApiOutcome {
    Datasets(Result<Vec<DatasetInfo>, ApiError>),
    Dataset {
        path: String,
        result: Result<DatasetContent, ApiError>,
    },
    ForkSaved {
        path: String,
        result: Result<(), ApiError>,
    },
    PrCreated(Result<PullRequest, ApiError>),
    Prs(Result<Vec<PullRequest>, ApiError>),
    Diff {
        pr_id: String,
        seq: u64,
        result: Result<DiffResult, ApiError>,
    },
    PrProcessed {
        seq: u64,
        accepted: usize,
        result: Result<(), ApiError>,
    },
    PrMerged(Result<(), ApiError>),
    PrRejected(Result<(), ApiError>),
    GitRemote(Result<String, ApiError>),
    GitRemoteSaved(Result<(), ApiError>),
    GitSynced(Result<String, ApiError>),
    GitPushed(Result<String, ApiError>),
}
