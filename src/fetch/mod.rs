//! Game API client.
//!
//! Fetches clan profiles, current river races, race logs, clan searches
//! and player data from the official game API. Every request goes to the network; nothing is cached.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::UpstreamConfig;
use crate::models::{Battle, ClanProfile, ClanTag, PlayerProfile, PlayerTag, RaceLogEntry, RaceSnapshot};

/// Errors that can occur while talking to the game API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Not found.")]
    NotFound,

    #[error("Supercell rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Supercell maintenance break.")]
    Maintenance,

    #[error("Unexpected error. Please try again. (HTTP {status})")]
    HttpStatus { status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    /// Map a non-success upstream status to an error.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => FetchError::NotFound,
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
            StatusCode::SERVICE_UNAVAILABLE => FetchError::Maintenance,
            other => FetchError::HttpStatus {
                status: other.as_u16(),
            },
        }
    }
}

/// Source of game data.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Client name for logging.
    fn name(&self) -> &'static str;

    /// The clan's current river race.
    async fn river_race(&self, tag: &ClanTag) -> Result<RaceSnapshot, FetchError>;

    /// The clan's profile.
    async fn clan(&self, tag: &ClanTag) -> Result<ClanProfile, FetchError>;

    /// The clan's finished races, newest first.
    async fn race_log(&self, tag: &ClanTag) -> Result<Vec<RaceLogEntry>, FetchError>;

    /// Clans whose name matches `name`.
    async fn search_clans(&self, name: &str) -> Result<Vec<ClanProfile>, FetchError>;

    /// A player's profile.
    async fn player(&self, tag: &PlayerTag) -> Result<PlayerProfile, FetchError>;

    /// A player's recent battles, newest first.
    async fn battle_log(&self, tag: &PlayerTag) -> Result<Vec<Battle>, FetchError>;
}

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.clashroyale.com/v1`
    pub base_url: Url,

    /// Bearer token
    pub api_token: String,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://api.clashroyale.com/v1").expect("static URL"),
            api_token: String::new(),
            timeout: Duration::from_secs(10),
            user_agent: format!("cwstats-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TryFrom<&UpstreamConfig> for ClientConfig {
    type Error = FetchError;

    fn try_from(config: &UpstreamConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            base_url: Url::parse(&config.base_url)?,
            api_token: config.api_token.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// `{"items": [...]}` list envelope used by the game API.
#[derive(Debug, Deserialize)]
struct Items<T> {
    items: Vec<T>,
}

/// HTTP client for the official game API.
pub struct SupercellClient {
    client: Client,
    config: ClientConfig,
}

impl SupercellClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("cwstats-api")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    fn root(&self) -> &str {
        self.config.base_url.as_str().trim_end_matches('/')
    }

    /// URL for a tagged resource, e.g. `/clans/%23TAG/currentriverrace`.
    fn tagged_url(&self, collection: &str, tag: &ClanTag, resource: &str) -> Result<Url, FetchError> {
        let url = if resource.is_empty() {
            format!("{}/{}/{}", self.root(), collection, tag.encoded())
        } else {
            format!("{}/{}/{}/{}", self.root(), collection, tag.encoded(), resource)
        };
        Ok(Url::parse(&url)?)
    }

    fn clan_url(&self, tag: &ClanTag, resource: &str) -> Result<Url, FetchError> {
        self.tagged_url("clans", tag, resource)
    }

    fn player_url(&self, tag: &PlayerTag, resource: &str) -> Result<Url, FetchError> {
        self.tagged_url("players", tag, resource)
    }

    /// URL for a clan name search, `/clans?name=...`.
    fn search_url(&self, name: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!("{}/clans", self.root()))?;
        url.query_pairs_mut().append_pair("name", name);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            info!("Upstream returned {} for {}", status, url.path());
            return Err(FetchError::from_status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl GameApi for SupercellClient {
    fn name(&self) -> &'static str {
        "supercell"
    }

    #[instrument(skip(self), fields(tag = %tag))]
    async fn river_race(&self, tag: &ClanTag) -> Result<RaceSnapshot, FetchError> {
        let url = self.clan_url(tag, "currentriverrace")?;
        self.get_json(url).await
    }

    #[instrument(skip(self), fields(tag = %tag))]
    async fn clan(&self, tag: &ClanTag) -> Result<ClanProfile, FetchError> {
        let url = self.clan_url(tag, "")?;
        self.get_json(url).await
    }

    #[instrument(skip(self), fields(tag = %tag))]
    async fn race_log(&self, tag: &ClanTag) -> Result<Vec<RaceLogEntry>, FetchError> {
        let url = self.clan_url(tag, "riverracelog")?;
        let log: Items<RaceLogEntry> = self.get_json(url).await?;
        Ok(log.items)
    }

    #[instrument(skip(self))]
    async fn search_clans(&self, name: &str) -> Result<Vec<ClanProfile>, FetchError> {
        let url = self.search_url(name)?;
        let clans: Items<ClanProfile> = self.get_json(url).await?;
        Ok(clans.items)
    }

    #[instrument(skip(self), fields(tag = %tag))]
    async fn player(&self, tag: &PlayerTag) -> Result<PlayerProfile, FetchError> {
        let url = self.player_url(tag, "")?;
        self.get_json(url).await
    }

    /// The battle log is a bare array, not an `items` envelope.
    #[instrument(skip(self), fields(tag = %tag))]
    async fn battle_log(&self, tag: &PlayerTag) -> Result<Vec<Battle>, FetchError> {
        let url = self.player_url(tag, "battlelog")?;
        self.get_json(url).await
    }
}

/// Canned game data for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MockGameApi {
    pub race: Option<RaceSnapshot>,
    pub clan: Option<ClanProfile>,
    pub log: Option<Vec<RaceLogEntry>>,
    pub search: Option<Vec<ClanProfile>>,
    pub player: Option<PlayerProfile>,
    pub battles: Option<Vec<Battle>>,
    /// Names passed to `search_clans`, in call order.
    pub searched: std::sync::Mutex<Vec<String>>,
    /// When set, every call fails as if upstream returned this status.
    pub status: Option<u16>,
}

#[cfg(test)]
impl MockGameApi {
    fn fail_or<T: Clone>(&self, value: &Option<T>) -> Result<T, FetchError> {
        if let Some(status) = self.status {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            return Err(FetchError::from_status(status));
        }
        value.clone().ok_or(FetchError::NotFound)
    }
}

#[cfg(test)]
#[async_trait]
impl GameApi for MockGameApi {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn river_race(&self, _tag: &ClanTag) -> Result<RaceSnapshot, FetchError> {
        self.fail_or(&self.race)
    }

    async fn clan(&self, _tag: &ClanTag) -> Result<ClanProfile, FetchError> {
        self.fail_or(&self.clan)
    }

    async fn race_log(&self, _tag: &ClanTag) -> Result<Vec<RaceLogEntry>, FetchError> {
        self.fail_or(&self.log)
    }

    async fn search_clans(&self, name: &str) -> Result<Vec<ClanProfile>, FetchError> {
        if let Ok(mut searched) = self.searched.lock() {
            searched.push(name.to_string());
        }
        self.fail_or(&self.search)
    }

    async fn player(&self, _tag: &PlayerTag) -> Result<PlayerProfile, FetchError> {
        self.fail_or(&self.player)
    }

    async fn battle_log(&self, _tag: &PlayerTag) -> Result<Vec<Battle>, FetchError> {
        self.fail_or(&self.battles)
    }
}
