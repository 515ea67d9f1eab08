//! PokeAPI client implementation.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use pokedex_core::constants::{
    DEFAULT_TIMEOUT_SECS, LOCATION_AREA_PATH, POKEAPI_BASE_URL, POKEMON_PATH, USER_AGENT,
};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::ResponseCache;
use pokedex_core::types::{LocationAreaDetail, LocationAreaPage, PokemonDetail};

/// Client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. "https://pokeapi.co/api/v2"
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: POKEAPI_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: USER_AGENT.into(),
        }
    }
}

impl ClientConfig {
    /// Reads `POKEAPI_BASE_URL` and `POKEAPI_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: var("POKEAPI_BASE_URL").unwrap_or(defaults.base_url),
            timeout_seconds: var("POKEAPI_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            user_agent: defaults.user_agent,
        }
    }

    /// Points the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Fetch-or-cache client for the PokeAPI resources the shell uses.
///
/// Cache keys are full request URLs, so a page URL handed back by the API
/// (`next`/`previous`) and the same URL built locally share one entry.
pub struct PokeApiClient {
    base_url: Url,
    http_client: reqwest::Client,
    cache: Arc<dyn ResponseCache>,
}

impl PokeApiClient {
    /// Creates a client with default configuration.
    pub fn new(cache: Arc<dyn ResponseCache>) -> Result<Self> {
        Self::with_config(ClientConfig::default(), cache)
    }

    /// Creates a client with custom configuration.
    ///
    /// Fails on an unusable base URL or a zero timeout.
    pub fn with_config(config: ClientConfig, cache: Arc<dyn ResponseCache>) -> Result<Self> {
        if config.timeout_seconds == 0 {
            return Err(PokedexError::ConfigError(
                "request timeout must be at least one second".into(),
            ));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            PokedexError::ConfigError(format!("invalid base URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PokedexError::ConfigError(format!(
                "base URL '{}' cannot have a path",
                config.base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| PokedexError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            http_client,
            cache,
        })
    }

    /// URL of the first location-area page.
    pub fn location_areas_url(&self) -> String {
        self.endpoint(&[LOCATION_AREA_PATH, ""])
    }

    /// URL of a single location area.
    pub fn location_area_url(&self, name: &str) -> String {
        self.endpoint(&[LOCATION_AREA_PATH, name])
    }

    /// URL of a single Pokemon.
    pub fn pokemon_url(&self, name: &str) -> String {
        self.endpoint(&[POKEMON_PATH, name])
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        // Never fails: cannot-be-a-base URLs are rejected at construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    /// Fetches one page of the location-area listing.
    #[instrument(skip(self))]
    pub async fn fetch_location_areas(&self, url: &str) -> Result<LocationAreaPage> {
        self.fetch_cached(url).await
    }

    /// Fetches a single location area with its encounters.
    #[instrument(skip(self))]
    pub async fn fetch_location_area(&self, url: &str) -> Result<LocationAreaDetail> {
        self.fetch_cached(url).await
    }

    /// Fetches a single Pokemon.
    #[instrument(skip(self))]
    pub async fn fetch_pokemon(&self, url: &str) -> Result<PokemonDetail> {
        self.fetch_cached(url).await
    }

    /// Decodes from cache on a hit; otherwise downloads, decodes, then caches.
    ///
    /// Nothing is cached unless the body decodes as `T`.
    async fn fetch_cached<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Serving from cache");
            return Ok(serde_json::from_slice(&body)?);
        }

        let body = self.download(url).await?;
        let decoded = serde_json::from_slice(&body).map_err(|e| {
            warn!(url, error = %e, "Response did not decode");
            PokedexError::from(e)
        })?;

        self.cache.add(url, body);
        Ok(decoded)
    }

    async fn download(&self, url: &str) -> Result<Bytes> {
        let response = self
            .http_client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| PokedexError::TransportError(e.to_string()))?;

        if response.status() != StatusCode::OK {
            warn!(url, status = %response.status(), "Unexpected status");
            return Err(PokedexError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PokedexError::TransportError(e.to_string()))?;

        debug!(url, bytes = body.len(), "Downloaded");
        Ok(body)
    }
}

impl std::fmt::Debug for PokeApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokeApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
