use thiserror::Error;

/// Failure of a single search call, labelled with the step that failed.
///
/// Nothing is retried; the caller gets either a complete
/// [`SearchResponse`](crate::SearchResponse) or one of these.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("tavily search, serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("tavily search, build request: {0}")]
    BuildRequest(#[source] reqwest::Error),

    #[error("tavily search, call /search api: {0}")]
    Call(#[source] reqwest::Error),

    #[error("tavily search, call /search api: timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("tavily search, call /search api: cancelled")]
    Cancelled,

    #[error("tavily search, read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("tavily search, response status code: {status}, response body: {body}")]
    Status { status: u16, body: String },

    #[error("tavily search, parse response: {0}")]
    Parse(#[source] serde_json::Error),
}

impl SearchError {
    pub(crate) fn from_call(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Call(err)
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::Serialize(_) => "serialize",
            Self::BuildRequest(_) => "build request",
            Self::Call(_) | Self::Timeout(_) | Self::Cancelled => "call",
            Self::ReadBody(_) => "read body",
            Self::Status { .. } => "status check",
            Self::Parse(_) => "parse",
        }
    }

    /// The request never got a complete answer from the provider.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Call(_) | Self::Timeout(_) | Self::Cancelled)
    }

    /// HTTP status of a non-200 response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
