use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::fmt;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::models::{SearchOption, SearchRequest, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Client for the Tavily `/search` endpoint.
///
/// Cloning is cheap and clones share the underlying `reqwest::Client`, so one
/// instance can serve any number of concurrent searches.
#[derive(Clone)]
pub struct SearchClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
    timeout: Option<Duration>,
}

impl fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SearchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            http: reqwest::Client::new(),
            timeout: None,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        let client = Self::new(config.api_key.clone()).with_base_url(config.base_url.clone());
        match config.timeout {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }

    /// Point the client at another host, e.g. a mock server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a caller-provided transport, for shared pools or custom TLS/proxy setups.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Deadline for each request, covering connect through the end of the body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search with an answer included and at most five results.
    pub async fn search(
        &self,
        cancel: &CancellationToken,
        query: &str,
    ) -> Result<SearchResponse, SearchError> {
        self.search_with_options(
            cancel,
            query,
            [SearchOption::IncludeAnswer(true), SearchOption::MaxResults(5)],
        )
        .await
    }

    /// Search with `options` applied in order on top of the provider's defaults.
    ///
    /// Cancelling `cancel` aborts the request, including while the body is being
    /// read, and yields [`SearchError::Cancelled`].
    #[instrument(skip(self, cancel, options), fields(base_url = %self.base_url))]
    pub async fn search_with_options<I>(
        &self,
        cancel: &CancellationToken,
        query: &str,
        options: I,
    ) -> Result<SearchResponse, SearchError>
    where
        I: IntoIterator<Item = SearchOption>,
    {
        let start_time = Instant::now();
        let search_request = SearchRequest::new(query, self.api_key.as_str()).with_options(options);
        let body = serde_json::to_vec(&search_request).map_err(SearchError::Serialize)?;

        let mut builder = self
            .http
            .post(format!("{}/search", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let request = builder.build().map_err(SearchError::BuildRequest)?;

        debug!(
            max_results = search_request.max_results,
            search_depth = %search_request.search_depth,
            "Calling Tavily /search"
        );

        let exchange = async {
            let response = self
                .http
                .execute(request)
                .await
                .map_err(SearchError::from_call)?;
            let status = response.status();
            let body = response.bytes().await.map_err(SearchError::ReadBody)?;
            Ok::<_, SearchError>((status, body))
        };

        let (status, body) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Search cancelled before a response arrived");
                return Err(SearchError::Cancelled);
            }
            exchange = exchange => exchange?,
        };

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Tavily returned a non-success status");
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let search_response: SearchResponse =
            serde_json::from_slice(&body).map_err(SearchError::Parse)?;

        info!(
            results = search_response.results.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Tavily search completed"
        );
        Ok(search_response)
    }
}
