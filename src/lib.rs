//! Client for the Tavily web search API.
//!
//! ```no_run
//! use tavily_search::{SearchClient, SearchOption};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), tavily_search::SearchError> {
//! let client = SearchClient::new("tvly-...");
//! let cancel = CancellationToken::new();
//! let response = client
//!     .search_with_options(
//!         &cancel,
//!         "What is GitHub?",
//!         [SearchOption::search_depth("advanced"), SearchOption::MaxResults(3)],
//!     )
//!     .await?;
//! for result in &response.results {
//!     println!("{} ({})", result.title, result.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tools;

pub use client::{SearchClient, DEFAULT_BASE_URL};
pub use config::{ConfigError, SearchConfig};
pub use error::SearchError;
pub use models::{SearchOption, SearchRequest, SearchResponse, SearchResult};
