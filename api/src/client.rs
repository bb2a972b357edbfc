use crate::swehockey::{ActionsResponse, LineUpsResponse, SummaryResponse};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "https://backend-app.swehockey.se/GameTicker";
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(500);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The three per-game documents the ticker backend publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    LineUps,
    Summary,
    Actions,
}

impl DocumentKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            DocumentKind::LineUps => "LineUps",
            DocumentKind::Summary => "Summary",
            DocumentKind::Actions => "Actions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::LineUps => "lineups",
            DocumentKind::Summary => "summary",
            DocumentKind::Actions => "events",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One decoded document, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDocument {
    LineUps(LineUpsResponse),
    Summary(SummaryResponse),
    Actions(ActionsResponse),
}

impl RawDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            RawDocument::LineUps(_) => DocumentKind::LineUps,
            RawDocument::Summary(_) => DocumentKind::Summary,
            RawDocument::Actions(_) => DocumentKind::Actions,
        }
    }
}

/// Anything that can hand the session a raw document for a game.
pub trait GameSource {
    fn fetch(
        &self,
        kind: DocumentKind,
        game_id: u64,
    ) -> impl Future<Output = ApiResult<RawDocument>> + Send;
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Status {
        kind: DocumentKind,
        status: StatusCode,
        url: String,
    },
    Parsing(reqwest::Error, String),
    /// Refresh requested before any game was loaded.
    NoSession,
    Export(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status { kind, status, url } => {
                write!(f, "HTTP {status} fetching {kind} from {url}")
            }
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NoSession => write!(f, "No game loaded; call load first"),
            ApiError::Export(msg) => write!(f, "Export failed: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

/// GameTicker client for backend-app.swehockey.se.
#[derive(Debug, Clone)]
pub struct SwehockeyClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    rate_limit_delay: Duration,
}

impl Default for SwehockeyClient {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("x-backendversion", HeaderValue::from_static("2"));
        headers.insert("x-useridentity", HeaderValue::from_static("_"));

        Self {
            client: Client::builder()
                .user_agent("hockey-ticker/0.1 (game ticker export)")
                .default_headers(headers)
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            rate_limit_delay: DEFAULT_RATE_LIMIT,
        }
    }
}

impl SwehockeyClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Pause after every request. Zero disables it.
    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    pub fn url_for(&self, kind: DocumentKind, game_id: u64) -> String {
        format!("{}/{}/{game_id}", self.base_url, kind.endpoint())
    }

    pub async fn fetch_line_ups(&self, game_id: u64) -> ApiResult<LineUpsResponse> {
        self.get(DocumentKind::LineUps, game_id).await
    }

    pub async fn fetch_summary(&self, game_id: u64) -> ApiResult<SummaryResponse> {
        self.get(DocumentKind::Summary, game_id).await
    }

    pub async fn fetch_actions(&self, game_id: u64) -> ApiResult<ActionsResponse> {
        self.get(DocumentKind::Actions, game_id).await
    }

    async fn get<T: DeserializeOwned>(&self, kind: DocumentKind, game_id: u64) -> ApiResult<T> {
        let url = self.url_for(kind, game_id);
        debug!("GET {url}");

        let sent = self.client.get(&url).timeout(self.timeout).send().await;
        self.throttle().await;
        let response = sent.map_err(|e| ApiError::Network(e, url.clone()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { kind, status, url });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url))
    }

    async fn throttle(&self) {
        if !self.rate_limit_delay.is_zero() {
            tokio::time::sleep(self.rate_limit_delay).await;
        }
    }
}

impl GameSource for SwehockeyClient {
    async fn fetch(&self, kind: DocumentKind, game_id: u64) -> ApiResult<RawDocument> {
        Ok(match kind {
            DocumentKind::LineUps => RawDocument::LineUps(self.fetch_line_ups(game_id).await?),
            DocumentKind::Summary => RawDocument::Summary(self.fetch_summary(game_id).await?),
            DocumentKind::Actions => RawDocument::Actions(self.fetch_actions(game_id).await?),
        })
    }
}
