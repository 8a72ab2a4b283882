use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::client::SearchClient;
use crate::error::SearchError;
use crate::models::{SearchOption, SearchResponse};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SearchClient>,
    /// Cancelled on shutdown; every in-flight search listens to a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(client: SearchClient, shutdown: CancellationToken) -> Self {
        Self {
            client: Arc::new(client),
            shutdown,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiSearchRequest {
    pub query: String,
    pub search_depth: Option<String>,
    pub topic: Option<String>,
    pub max_results: Option<u32>,
    pub include_answer: Option<bool>,
    pub include_raw_content: Option<bool>,
    pub include_images: Option<bool>,
    pub include_domains: Option<Vec<String>>,
}

impl ApiSearchRequest {
    fn options(&self) -> Vec<SearchOption> {
        let mut options = Vec::new();
        if let Some(include) = self.include_answer {
            options.push(SearchOption::IncludeAnswer(include));
        }
        if let Some(max) = self.max_results {
            options.push(SearchOption::MaxResults(max));
        }
        if let Some(depth) = &self.search_depth {
            options.push(SearchOption::SearchDepth(depth.clone()));
        }
        if let Some(topic) = &self.topic {
            options.push(SearchOption::Topic(topic.clone()));
        }
        if let Some(include) = self.include_raw_content {
            options.push(SearchOption::IncludeRawContent(include));
        }
        if let Some(include) = self.include_images {
            options.push(SearchOption::IncludeImages(include));
        }
        if let Some(domains) = &self.include_domains {
            options.push(SearchOption::IncludeDomains(domains.clone()));
        }
        options
    }
}

#[derive(Debug)]
pub enum ApiError {
    InvalidBody(JsonRejection),
    EmptyQuery,
    Search(SearchError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::EmptyQuery => (StatusCode::BAD_REQUEST, "query must not be empty".to_string()),
            ApiError::Search(err) => {
                let status = match err {
                    SearchError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                    SearchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    SearchError::Serialize(_) | SearchError::BuildRequest(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, err.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", post(search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
async fn search(
    State(state): State<AppState>,
    payload: Result<Json<ApiSearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(req) = payload?;
    if req.query.trim().is_empty() {
        return Err(ApiError::EmptyQuery);
    }

    info!(query = %req.query, "Proxying search");
    let cancel = state.shutdown.child_token();
    let response = state
        .client
        .search_with_options(&cancel, &req.query, req.options())
        .await
        .map_err(|e| {
            error!(stage = e.stage(), "Search failed: {}", e);
            e
        })?;

    info!("Returning {} results", response.results.len());
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_produce_no_options() {
        let req: ApiSearchRequest = serde_json::from_str(r#"{"query": "q"}"#).unwrap();
        assert!(req.options().is_empty());
    }

    #[test]
    fn set_fields_produce_options_in_field_order() {
        let req: ApiSearchRequest = serde_json::from_str(
            r#"{"query": "q", "include_answer": true, "max_results": 7, "topic": "news"}"#,
        )
        .unwrap();
        assert_eq!(
            req.options(),
            vec![
                SearchOption::IncludeAnswer(true),
                SearchOption::MaxResults(7),
                SearchOption::topic("news"),
            ]
        );
    }

    #[test]
    fn provider_status_maps_to_bad_gateway() {
        let response = ApiError::Search(SearchError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn cancellation_maps_to_service_unavailable() {
        let response = ApiError::Search(SearchError::Cancelled).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
