use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Body of `POST /search`.
///
/// Every field is left out of the JSON when it holds its zero value so the
/// provider applies its own defaults for anything the caller did not set.
#[derive(Clone, Default, PartialEq, Serialize)]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub query: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search_depth: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub topic: String,
    #[serde(skip_serializing_if = "is_false")]
    pub include_answer: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub include_raw_content: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub include_images: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_domains: Vec<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_results: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Sets the single field `option` refers to, replacing any earlier value.
    pub fn apply(&mut self, option: SearchOption) {
        match option {
            SearchOption::IncludeAnswer(include) => self.include_answer = include,
            SearchOption::MaxResults(max) => self.max_results = max,
            SearchOption::SearchDepth(depth) => self.search_depth = depth,
            SearchOption::Topic(topic) => self.topic = topic,
            SearchOption::IncludeRawContent(include) => self.include_raw_content = include,
            SearchOption::IncludeImages(include) => self.include_images = include,
            SearchOption::IncludeDomains(domains) => self.include_domains = domains,
        }
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = SearchOption>) -> Self {
        for option in options {
            self.apply(option);
        }
        self
    }
}

impl fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRequest")
            .field("query", &self.query)
            .field("api_key", &"<redacted>")
            .field("search_depth", &self.search_depth)
            .field("topic", &self.topic)
            .field("include_answer", &self.include_answer)
            .field("include_raw_content", &self.include_raw_content)
            .field("include_images", &self.include_images)
            .field("include_domains", &self.include_domains)
            .field("max_results", &self.max_results)
            .finish()
    }
}

/// An adjustment to one optional field of a [`SearchRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOption {
    IncludeAnswer(bool),
    MaxResults(u32),
    /// Provider-defined, usually `"basic"` or `"advanced"`.
    SearchDepth(String),
    Topic(String),
    IncludeRawContent(bool),
    IncludeImages(bool),
    /// Restrict results to these domains.
    IncludeDomains(Vec<String>),
}

impl SearchOption {
    pub fn search_depth(depth: impl Into<String>) -> Self {
        Self::SearchDepth(depth.into())
    }

    pub fn topic(topic: impl Into<String>) -> Self {
        Self::Topic(topic.into())
    }

    pub fn include_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::IncludeDomains(domains.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(deserialize_with = "null_as_default")]
    pub follow_up_questions: Vec<String>,
    /// Empty unless an answer was requested.
    #[serde(deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    /// Ranked by the provider; never re-sorted here.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
    /// Seconds, as reported by the provider.
    #[serde(deserialize_with = "null_as_default")]
    pub response_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
    /// Shape depends on the request flags: a string, nested JSON, or `null`.
    pub raw_content: Value,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
