//! Constants for the Pokedex shell.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// POKEAPI
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the public PokeAPI (v2).
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Path segment for location area resources.
pub const LOCATION_AREA_PATH: &str = "location-area";

/// Path segment for Pokemon resources.
pub const POKEMON_PATH: &str = "pokemon";

/// User agent sent with every request.
pub const USER_AGENT: &str = "PokedexCLI";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default cache reclamation interval in milliseconds.
pub const DEFAULT_CACHE_INTERVAL_MS: u64 = 5_000;

/// Default cache reclamation interval.
pub const DEFAULT_CACHE_INTERVAL: Duration = Duration::from_millis(DEFAULT_CACHE_INTERVAL_MS);

// ═══════════════════════════════════════════════════════════════════════════════
// CATCHING
// ═══════════════════════════════════════════════════════════════════════════════

/// Upper bound of the catch roll (exclusive) and of the catch threshold.
pub const CATCH_ROLL_MAX: u32 = 100;

/// Base experience is divided by this before being subtracted from the threshold.
/// Low-experience Pokemon (~50) land near 95%, heavy hitters (~300) near 70%.
pub const CATCH_EXPERIENCE_DIVISOR: u32 = 10;
