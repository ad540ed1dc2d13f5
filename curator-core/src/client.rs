//! HTTP client for the curation backend.
//!
//! Thin request/response wrappers over `reqwest` — one method per backend
//! operation, no retry logic, no caching. Every method returns
//! `Result<_, ApiError>`; callers own in-flight bookkeeping.

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::types::{DatasetContent, DatasetInfo, DiffResult, PullRequest};

#[derive(Deserialize)]
struct DatasetList {
    datasets: Vec<DatasetInfo>,
}

#[derive(Deserialize)]
struct RemoteConfig {
    #[serde(default)]
    remote_url: String,
}

/// `{status, message, output?}` envelope returned by git operations.
#[derive(Deserialize)]
struct GitOutcome {
    #[serde(default)]
    message: String,
    #[serde(default)]
    output: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Authenticated client for one backend instance.
///
/// The bearer token comes from config; when absent, requests go out
/// unauthenticated and the backend decides what that user may see.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authed(self.client.get(format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authed(self.client.post(format!("{}{}", self.base_url, path)))
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Converts a non-success response into `ApiError::Backend`, pulling
    /// the `detail` string out of the JSON error body when there is one.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_owned(),
        };
        Err(ApiError::Backend {
            status: status.as_u16(),
            detail,
        })
    }

    /// Lists the dataset files visible to the current user.
    pub async fn list_datasets(&self) -> Result<Vec<DatasetInfo>, ApiError> {
        let response = Self::check(self.get("/datasets").send().await?).await?;
        let list: DatasetList = response.json().await?;
        Ok(list.datasets)
    }

    /// Fetches dataset content, preferring the caller's fork when one
    /// exists. `path` is the `{turn_type}/{filename}` key.
    pub async fn fetch_dataset(&self, path: &str) -> Result<DatasetContent, ApiError> {
        let url = format!("/datasets/{}?fork=true", path);
        let response = Self::check(self.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Saves `content` to the caller's fork of `path`. The fork is created
    /// implicitly on first save.
    pub async fn save_fork(
        &self,
        path: &str,
        content: &serde_json::Value,
    ) -> Result<(), ApiError> {
        let url = format!("/datasets/{}", path);
        let response = self
            .post(&url)
            .json(&json!({ "content": content }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Opens a PR proposing the caller's fork of `dataset_path`.
    pub async fn create_pr(
        &self,
        dataset_path: &str,
        description: &str,
    ) -> Result<PullRequest, ApiError> {
        let response = self
            .post("/workflow/pr")
            .query(&[("dataset_path", dataset_path), ("description", description)])
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Lists all PRs, newest first (backend ordering preserved).
    pub async fn list_prs(&self) -> Result<Vec<PullRequest>, ApiError> {
        let response = Self::check(self.get("/workflow/prs").send().await?).await?;
        Ok(response.json().await?)
    }

    /// Fetches the structured comparison between a PR's fork and upstream.
    pub async fn fetch_diff(&self, pr_id: &str) -> Result<DiffResult, ApiError> {
        let url = format!("/workflow/prs/{}/diff", pr_id);
        let response = Self::check(self.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Selective merge: applies only `accepted` indices; every omitted
    /// index is treated as rejected for that item. The backend decides the
    /// PR's resulting status.
    pub async fn process_pr(&self, pr_id: &str, accepted: &[usize]) -> Result<(), ApiError> {
        let url = format!("/workflow/prs/{}/process", pr_id);
        let response = self
            .post(&url)
            .json(&json!({ "accepted_indices": accepted }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Whole-PR merge. Irreversible: overwrites the target dataset file.
    pub async fn merge_pr(&self, pr_id: &str) -> Result<(), ApiError> {
        let url = format!("/workflow/prs/{}/merge", pr_id);
        Self::check(self.post(&url).send().await?).await?;
        Ok(())
    }

    /// Rejects the PR outright. Irreversible.
    pub async fn reject_pr(&self, pr_id: &str) -> Result<(), ApiError> {
        let url = format!("/workflow/prs/{}/reject", pr_id);
        Self::check(self.post(&url).send().await?).await?;
        Ok(())
    }

    /// Current git remote URL of the upstream dataset repository.
    pub async fn git_remote(&self) -> Result<String, ApiError> {
        let response = Self::check(self.get("/workflow/git/config").send().await?).await?;
        let config: RemoteConfig = response.json().await?;
        Ok(config.remote_url)
    }

    pub async fn set_git_remote(&self, url: &str) -> Result<(), ApiError> {
        let response = self
            .post("/workflow/git/config")
            .json(&json!({ "url": url }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Server-side `git pull`; returns the command output for display.
    pub async fn git_sync(&self) -> Result<String, ApiError> {
        let response = Self::check(self.post("/workflow/git/sync").send().await?).await?;
        let outcome: GitOutcome = response.json().await?;
        Ok(outcome.output.unwrap_or(outcome.message))
    }

    /// Server-side `git push`; returns the command output for display.
    pub async fn git_push(&self) -> Result<String, ApiError> {
        let response = Self::check(self.post("/workflow/git/push").send().await?).await?;
        let outcome: GitOutcome = response.json().await?;
        Ok(outcome.output.unwrap_or(outcome.message))
    }
}
