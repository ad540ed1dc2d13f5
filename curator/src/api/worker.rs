//! Background task that owns the `ApiClient` for its lifetime.
//!
//! Requests are handled sequentially in arrival order, which matches how
//! the reviewer issues them (open diff, toggle, submit) and means a reload
//! queued after a mutation always observes the mutation's result.

use curator_core::client::ApiClient;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::api::types::{ApiOutcome, ApiRequest};
use crate::event::AppEvent;

/// Spawns the API worker task.
///
/// Runs until the request channel closes (sender dropped on shutdown).
/// Every request produces exactly one `AppEvent::Api` — including on
/// failure, so in-flight flags in `AppState` are always cleared.
pub fn spawn_api_worker(
    client: ApiClient,
    mut rx: UnboundedReceiver<ApiRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            let outcome = handle_request(&client, request).await;
            if event_tx.send(AppEvent::Api(Box::new(outcome))).is_err() {
                break;
            }
        }
    });
}

/// Dispatches one request to the matching client call.
async fn handle_request(client: &ApiClient, request: ApiRequest) -> ApiOutcome {
    match request {
        ApiRequest::ListDatasets => ApiOutcome::Datasets(client.list_datasets().await),
        ApiRequest::FetchDataset { path } => {
            let result = client.fetch_dataset(&path).await;
            ApiOutcome::Dataset { path, result }
        }
        ApiRequest::SaveFork { path, content } => {
            let result = client.save_fork(&path, &content).await;
            ApiOutcome::ForkSaved { path, result }
        }
        ApiRequest::CreatePr {
            dataset_path,
            description,
        } => ApiOutcome::PrCreated(client.create_pr(&dataset_path, &description).await),
        ApiRequest::ListPrs => ApiOutcome::Prs(client.list_prs().await),
        ApiRequest::FetchDiff { pr_id, seq } => {
            let result = client.fetch_diff(&pr_id).await;
            ApiOutcome::Diff { pr_id, seq, result }
        }
        ApiRequest::ProcessPr {
            pr_id,
            seq,
            accepted,
        } => {
            let result = client.process_pr(&pr_id, &accepted).await;
            ApiOutcome::PrProcessed {
                seq,
                accepted: accepted.len(),
                result,
            }
        }
        ApiRequest::MergePr { pr_id } => ApiOutcome::PrMerged(client.merge_pr(&pr_id).await),
        ApiRequest::RejectPr { pr_id } => {
            ApiOutcome::PrRejected(client.reject_pr(&pr_id).await)
        }
        ApiRequest::GetGitRemote => ApiOutcome::GitRemote(client.git_remote().await),
        ApiRequest::SetGitRemote { url } => {
            ApiOutcome::GitRemoteSaved(client.set_git_remote(&url).await)
        }
        ApiRequest::GitSync => ApiOutcome::GitSynced(client.git_sync().await),
        ApiRequest::GitPush => ApiOutcome::GitPushed(client.git_push().await),
    }
}
