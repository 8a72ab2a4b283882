use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::client::SearchClient;
use crate::error::SearchError;
use crate::models::{SearchOption, SearchResponse};

const DEFAULT_MAX_RESULTS: u32 = 5;

/// Exposes [`SearchClient`] to rig agents as the `tavily_search` tool.
#[derive(Debug, Clone)]
pub struct TavilySearch {
    client: SearchClient,
    cancel: CancellationToken,
}

#[derive(Debug, Default, Deserialize)]
pub struct TavilySearchArgs {
    pub query: String,
    #[serde(default)]
    pub search_depth: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub include_domains: Vec<String>,
}

impl TavilySearchArgs {
    fn into_options(self) -> (String, Vec<SearchOption>) {
        let mut options = vec![
            SearchOption::IncludeAnswer(true),
            SearchOption::MaxResults(self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)),
        ];
        if let Some(depth) = self.search_depth {
            options.push(SearchOption::SearchDepth(depth));
        }
        if let Some(topic) = self.topic {
            options.push(SearchOption::Topic(topic));
        }
        if !self.include_domains.is_empty() {
            options.push(SearchOption::IncludeDomains(self.include_domains));
        }
        (self.query, options)
    }
}

impl TavilySearch {
    pub fn new(client: SearchClient) -> Self {
        Self {
            client,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort in-flight tool calls when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl Tool for TavilySearch {
    const NAME: &'static str = "tavily_search";

    type Error = SearchError;
    type Args = TavilySearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the web for information using Tavily search engine".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    },
                    "search_depth": {
                        "type": "string",
                        "enum": ["basic", "advanced"],
                        "description": "How thorough the search should be"
                    },
                    "topic": {
                        "type": "string",
                        "description": "Category hint such as \"general\" or \"news\""
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results to return"
                    },
                    "include_domains": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Only return results from these domains"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let (query, options) = args.into_options();
        let search_response = self
            .client
            .search_with_options(&self.cancel, &query, options)
            .await?;
        Ok(format_response(&search_response))
    }
}

fn format_response(response: &SearchResponse) -> String {
    let formatted_results = response
        .results
        .iter()
        .map(|r| format!("Title: {}\nURL: {}\nContent: {}\n", r.title, r.url, r.content))
        .collect::<Vec<_>>()
        .join("\n---\n");

    if response.answer.is_empty() {
        formatted_results
    } else {
        format!("Answer: {}\n\n---\n{}", response.answer, formatted_results)
    }
}
