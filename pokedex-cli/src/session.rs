//! Per-run shell state: pagination cursor, caught Pokemon, API handle.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pokedex_cache::ExpiringCache;
use pokedex_client::PokeApiClient;
use pokedex_core::constants::CATCH_ROLL_MAX;
use pokedex_core::types::{LocationAreaPage, Pokemon};

pub struct Session {
    client: PokeApiClient,
    cache: Option<Arc<ExpiringCache>>,
    next_url: Option<String>,
    previous_url: Option<String>,
    pokedex: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient, cache: Option<Arc<ExpiringCache>>) -> Self {
        Self::with_rng(client, cache, StdRng::from_entropy())
    }

    pub fn with_rng(client: PokeApiClient, cache: Option<Arc<ExpiringCache>>, rng: StdRng) -> Self {
        Self {
            client,
            cache,
            next_url: None,
            previous_url: None,
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// URL `map` should fetch: the next page, or the first one when there is none.
    pub fn next_page_url(&self) -> String {
        self.next_url
            .clone()
            .unwrap_or_else(|| self.client.location_areas_url())
    }

    pub fn previous_page_url(&self) -> Option<&str> {
        self.previous_url.as_deref()
    }

    /// Moves the cursor to `page`.
    pub fn turn_page(&mut self, page: &LocationAreaPage) {
        self.next_url = page.next.clone();
        self.previous_url = page.previous.clone();
    }

    pub fn roll(&mut self) -> u32 {
        self.rng.gen_range(0..CATCH_ROLL_MAX)
    }

    /// Adds `pokemon` unless one with the same name is already there.
    /// Returns false if it was already caught.
    pub fn record_catch(&mut self, pokemon: Pokemon) -> bool {
        if self.pokedex.contains_key(&pokemon.name) {
            return false;
        }
        self.pokedex.insert(pokemon.name.clone(), pokemon);
        true
    }

    pub fn caught(&self, name: &str) -> Option<&Pokemon> {
        self.pokedex.get(name)
    }

    pub fn pokedex(&self) -> impl Iterator<Item = &Pokemon> {
        self.pokedex.values()
    }

    pub fn cache(&self) -> Option<&ExpiringCache> {
        self.cache.as_deref()
    }

    /// Ends the session, handing back the cache so it can be shut down.
    pub fn into_cache(self) -> Option<Arc<ExpiringCache>> {
        self.cache
    }
}
