use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::model::{QuizOptions, RawQuestion, TriviaResponse};

pub const DEFAULT_ENDPOINT: &str = "https://opentdb.com/api.php";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a batch of questions could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Transport failure or a non-success HTTP status.
    Network(String),
    /// The body did not match the expected schema, or the provider said no.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Decode(msg) => write!(f, "Bad response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Source of raw trivia questions.
pub trait TriviaProvider {
    fn fetch(&self, options: &QuizOptions) -> Result<Vec<RawQuestion>, FetchError>;
}

/// Open Trivia DB over HTTP.
pub struct HttpProvider {
    client: Client,
    endpoint: String,
}

impl HttpProvider {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TriviaProvider for HttpProvider {
    fn fetch(&self, options: &QuizOptions) -> Result<Vec<RawQuestion>, FetchError> {
        let query = build_query(options);
        tracing::debug!(endpoint = %self.endpoint, ?query, "requesting questions");

        let response = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, concat!("triviaterm/", env!("CARGO_PKG_VERSION")))
            .query(&query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!("HTTP {}", status)));
        }

        let body = response.text()?;
        parse_response(&body)
    }
}

/// Query parameters for a request. `category` is left out when it is 0 (any).
pub fn build_query(options: &QuizOptions) -> Vec<(&'static str, String)> {
    let mut query = vec![("amount", options.question_count.to_string())];
    if options.category != 0 {
        query.push(("category", options.category.to_string()));
    }
    query.push(("difficulty", options.difficulty.as_query().to_string()));
    query.push(("type", options.question_type.as_query().to_string()));
    query
}

/// Decode a response body, rejecting non-zero response codes and empty batches.
pub fn parse_response(body: &str) -> Result<Vec<RawQuestion>, FetchError> {
    let response: TriviaResponse = serde_json::from_str(body)?;

    if response.response_code != 0 {
        return Err(FetchError::Decode(describe_response_code(
            response.response_code,
        )));
    }
    if response.results.is_empty() {
        return Err(FetchError::Decode(
            "provider returned no questions".to_string(),
        ));
    }

    Ok(response.results)
}

fn describe_response_code(code: u8) -> String {
    match code {
        1 => "not enough questions for these options".to_string(),
        2 => "invalid request parameter".to_string(),
        3 => "session token not found".to_string(),
        4 => "session token exhausted".to_string(),
        5 => "rate limited, wait a few seconds and retry".to_string(),
        other => format!("unexpected response code {}", other),
    }
}
