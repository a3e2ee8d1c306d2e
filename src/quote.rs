//! Inspirational quote collaborator. Every failure is absorbed here: callers
//! only ever see a `Quote`.

use crate::config::QuoteConfig;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::warn;

pub const FALLBACK_TEXT: &str = "صلوات، نوری در بهشت است.";
pub const FALLBACK_SOURCE: &str = "حدیث";
const DEFAULT_TEXT: &str = "اللهم صل علی محمد و آل محمد";
const DEFAULT_SOURCE: &str = "ذکر شریف";
const PROMPT: &str = "یک حدیث کوتاه یا جمله الهام‌بخش درباره فضیلت صلوات فرستادن به زبان فارسی بگو. فقط متن جمله و منبع آن را به صورت JSON برگردان با فرمت {\"text\": \"...\", \"source\": \"...\"}.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Quote {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_TEXT.to_string(),
            source: Some(FALLBACK_SOURCE.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    Fetched(Quote),
    Fallback(Quote),
}

impl QuoteOutcome {
    pub fn into_quote(self) -> Quote {
        match self {
            QuoteOutcome::Fetched(quote) | QuoteOutcome::Fallback(quote) => quote,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, QuoteOutcome::Fallback(_))
    }
}

#[derive(Debug, Error)]
enum QuoteError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("empty response")]
    EmptyResponse,
    #[error("malformed quote: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawQuote {
    text: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: reqwest::Client,
    config: QuoteConfig,
}

impl QuoteClient {
    pub fn new(config: QuoteConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Never fails; see [`QuoteClient::fetch_outcome`] for which path was taken.
    pub async fn fetch(&self) -> Quote {
        self.fetch_outcome().await.into_quote()
    }

    pub async fn fetch_outcome(&self) -> QuoteOutcome {
        match self.request().await {
            Ok(quote) => QuoteOutcome::Fetched(quote),
            Err(err) => {
                warn!("using fallback quote: {err}");
                QuoteOutcome::Fallback(Quote::fallback())
            }
        }
    }

    async fn request(&self) -> Result<Quote, QuoteError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(QuoteError::MissingApiKey)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": PROMPT }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(QuoteError::Status(response.status().as_u16()));
        }

        let reply: GenerateResponse = response.json().await?;
        parse_reply(reply)
    }
}

fn parse_reply(reply: GenerateResponse) -> Result<Quote, QuoteError> {
    let text: String = reply
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(QuoteError::EmptyResponse);
    }

    let raw: RawQuote = serde_json::from_str(&text)?;
    Ok(Quote {
        text: non_empty(raw.text).unwrap_or_else(|| DEFAULT_TEXT.to_string()),
        source: Some(non_empty(raw.source).unwrap_or_else(|| DEFAULT_SOURCE.to_string())),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// What the quote card shows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuoteDisplay {
    pub quote: Option<Quote>,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct BoardState {
    display: QuoteDisplay,
    in_flight: usize,
}

/// Holds the quote region. The lock is never held across the network call,
/// so overlapping refreshes both complete and the last to settle wins.
#[derive(Debug)]
pub struct QuoteBoard {
    client: QuoteClient,
    state: Mutex<BoardState>,
}

impl QuoteBoard {
    pub fn new(client: QuoteClient) -> Self {
        Self {
            client,
            state: Mutex::new(BoardState::default()),
        }
    }

    pub async fn current(&self) -> QuoteDisplay {
        self.state.lock().await.display.clone()
    }

    pub async fn refresh(&self) -> QuoteDisplay {
        {
            let mut state = self.state.lock().await;
            state.in_flight += 1;
            state.display.loading = true;
        }

        let quote = self.client.fetch().await;

        let mut state = self.state.lock().await;
        state.in_flight = state.in_flight.saturating_sub(1);
        state.display.loading = state.in_flight > 0;
        state.display.quote = Some(quote);
        state.display.clone()
    }
}
