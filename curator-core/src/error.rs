use thiserror::Error;

/// Failure of one backend operation.
///
/// The client distinguishes only two classes: the request never completed
/// (transport), or the backend answered with a rejection. Business-rule
/// rejections carry the backend's `detail` string verbatim; the client
/// does not interpret structured error codes beyond that.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request could not complete (connection refused, timeout,
    /// malformed response body).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{detail}")]
    Backend { status: u16, detail: String },
}

impl ApiError {
    /// True when the failure is a backend rejection rather than a
    /// transport problem. Rejections mean local state may be stale and the
    /// affected list should be refreshed.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Backend { .. })
    }
}
