//! PokeAPI client for the Pokedex shell.
//!
//! Every fetch goes through an injected [`ResponseCache`](pokedex_core::ResponseCache):
//! a hit decodes the cached body without touching the network, a miss
//! downloads, decodes, and only then caches the raw body.

mod client;

pub use client::{ClientConfig, PokeApiClient};
