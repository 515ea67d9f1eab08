//! Shell commands.
//!
//! Each command is a [`Command`] in the [`CommandRegistry`]. Commands write
//! their output to the writer they are handed so the REPL can be driven from
//! tests.

use std::io::Write;

use async_trait::async_trait;
use tracing::debug;

use pokedex_core::error::{PokedexError, Result};
use pokedex_core::types::Pokemon;

use crate::session::Session;

/// Output sink for commands.
pub type Output<'a> = &'a mut (dyn Write + Send);

/// What the REPL should do after a command returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A shell command.
#[async_trait]
pub trait Command: Send + Sync {
    /// Word typed to invoke the command.
    fn name(&self) -> &'static str;

    /// Usage line shown by `help`, e.g. `explore <location-name>`.
    fn usage(&self) -> &'static str {
        self.name()
    }

    fn description(&self) -> &'static str;

    async fn run(&self, session: &mut Session, args: &[String], out: Output<'_>) -> Result<Flow>;
}

/// Returns the single argument or a usage error naming `what`.
fn single_arg<'a>(command: &str, what: &str, args: &'a [String]) -> Result<&'a str> {
    match args {
        [arg] => Ok(arg.as_str()),
        _ => Err(PokedexError::InvalidArgument(format!(
            "{command} command requires a {what}"
        ))),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// Ordered set of commands, looked up by name.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// All built-in commands, in help order.
    pub fn builtin() -> Self {
        let mut commands: Vec<Box<dyn Command>> = vec![
            Box::new(Exit),
            Box::new(Map),
            Box::new(MapBack),
            Box::new(Explore),
            Box::new(Catch),
            Box::new(Inspect),
            Box::new(PokedexList),
            Box::new(CacheStatus),
        ];

        let mut usage = vec![(Help::USAGE, Help::DESCRIPTION)];
        usage.extend(commands.iter().map(|c| (c.usage(), c.description())));
        commands.insert(0, Box::new(Help { usage }));

        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

struct Help {
    usage: Vec<(&'static str, &'static str)>,
}

impl Help {
    const USAGE: &'static str = "help";
    const DESCRIPTION: &'static str = "Displays a help message";
}

#[async_trait]
impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn run(&self, _session: &mut Session, _args: &[String], out: Output<'_>) -> Result<Flow> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        for (usage, description) in &self.usage {
            writeln!(out, "{usage}: {description}")?;
        }
        Ok(Flow::Continue)
    }
}

struct Exit;

#[async_trait]
impl Command for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exits the Pokedex"
    }

    async fn run(&self, _session: &mut Session, _args: &[String], out: Output<'_>) -> Result<Flow> {
        writeln!(out, "Closing the Pokedex... Goodbye!")?;
        Ok(Flow::Exit)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOCATION COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

struct Map;

#[async_trait]
impl Command for Map {
    fn name(&self) -> &'static str {
        "map"
    }

    fn description(&self) -> &'static str {
        "Get the next page of locations"
    }

    async fn run(&self, session: &mut Session, _args: &[String], out: Output<'_>) -> Result<Flow> {
        let url = session.next_page_url();
        let page = session.client().fetch_location_areas(&url).await?;
        session.turn_page(&page);

        for name in page.names() {
            writeln!(out, "{name}")?;
        }
        Ok(Flow::Continue)
    }
}

struct MapBack;

#[async_trait]
impl Command for MapBack {
    fn name(&self) -> &'static str {
        "mapb"
    }

    fn description(&self) -> &'static str {
        "Get the previous page of locations"
    }

    async fn run(&self, session: &mut Session, _args: &[String], out: Output<'_>) -> Result<Flow> {
        let Some(url) = session.previous_page_url().map(str::to_owned) else {
            writeln!(out, "You're on the first page")?;
            return Ok(Flow::Continue);
        };

        let page = session.client().fetch_location_areas(&url).await?;
        session.turn_page(&page);

        for name in page.names() {
            writeln!(out, "{name}")?;
        }
        Ok(Flow::Continue)
    }
}

struct Explore;

#[async_trait]
impl Command for Explore {
    fn name(&self) -> &'static str {
        "explore"
    }

    fn usage(&self) -> &'static str {
        "explore <location-name>"
    }

    fn description(&self) -> &'static str {
        "Explore a location and see Pokemon"
    }

    async fn run(&self, session: &mut Session, args: &[String], out: Output<'_>) -> Result<Flow> {
        let location = single_arg(self.name(), "location name", args)?;
        let url = session.client().location_area_url(location);
        let area = session.client().fetch_location_area(&url).await?;

        writeln!(out, "Exploring {location}...")?;
        writeln!(out, "Found Pokemon:")?;
        for name in area.pokemon_names() {
            writeln!(out, "  - {name}")?;
        }
        Ok(Flow::Continue)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// POKEDEX COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

struct Catch;

#[async_trait]
impl Command for Catch {
    fn name(&self) -> &'static str {
        "catch"
    }

    fn usage(&self) -> &'static str {
        "catch <pokemon-name>"
    }

    fn description(&self) -> &'static str {
        "Attempt to catch a Pokemon"
    }

    async fn run(&self, session: &mut Session, args: &[String], out: Output<'_>) -> Result<Flow> {
        let name = single_arg(self.name(), "Pokemon name", args)?;
        let url = session.client().pokemon_url(name);
        let detail = session.client().fetch_pokemon(&url).await?;

        writeln!(out, "Throwing a Pokeball at {name}...")?;

        let roll = session.roll();
        debug!(pokemon = name, roll, threshold = detail.catch_threshold(), "Catch roll");
        if !detail.is_caught_by(roll) {
            writeln!(out, "{name} escaped!")?;
            return Ok(Flow::Continue);
        }

        writeln!(out, "{name} was caught!")?;
        if !session.record_catch(Pokemon::from(detail)) {
            writeln!(out, "{name} is already in your Pokedex!")?;
        }
        Ok(Flow::Continue)
    }
}

struct Inspect;

#[async_trait]
impl Command for Inspect {
    fn name(&self) -> &'static str {
        "inspect"
    }

    fn usage(&self) -> &'static str {
        "inspect <pokemon-name>"
    }

    fn description(&self) -> &'static str {
        "Inspect a caught Pokemon"
    }

    async fn run(&self, session: &mut Session, args: &[String], out: Output<'_>) -> Result<Flow> {
        let name = single_arg(self.name(), "Pokemon name", args)?;
        let pokemon = session
            .caught(name)
            .ok_or_else(|| PokedexError::NotCaught(name.to_string()))?;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for (stat, value) in pokemon.stat_lines() {
            writeln!(out, "  - {stat}: {value}")?;
        }
        writeln!(out, "Types:")?;
        for kind in pokemon.type_names() {
            writeln!(out, "  - {kind}")?;
        }
        Ok(Flow::Continue)
    }
}

struct PokedexList;

#[async_trait]
impl Command for PokedexList {
    fn name(&self) -> &'static str {
        "pokedex"
    }

    fn description(&self) -> &'static str {
        "Show the Pokedex"
    }

    async fn run(&self, session: &mut Session, _args: &[String], out: Output<'_>) -> Result<Flow> {
        writeln!(out, "Your Pokedex:")?;
        for pokemon in session.pokedex() {
            writeln!(out, "  - {}", pokemon.name)?;
        }
        Ok(Flow::Continue)
    }
}

struct CacheStatus;

#[async_trait]
impl Command for CacheStatus {
    fn name(&self) -> &'static str {
        "cache"
    }

    fn description(&self) -> &'static str {
        "Show response cache statistics"
    }

    async fn run(&self, session: &mut Session, _args: &[String], out: Output<'_>) -> Result<Flow> {
        let Some(cache) = session.cache() else {
            writeln!(out, "Response cache is disabled")?;
            return Ok(Flow::Continue);
        };

        let stats = cache.stats();
        writeln!(out, "Interval: {}ms", stats.interval.as_millis())?;
        writeln!(out, "Entries: {} ({} expired)", stats.total_entries, stats.expired_entries)?;
        writeln!(out, "Bytes: {}", stats.total_bytes)?;
        writeln!(out, "Reaper: {}", if cache.is_reaping() { "running" } else { "stopped" })?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use pokedex_cache::ExpiringCache;
    use pokedex_client::{ClientConfig, PokeApiClient};
    use pokedex_core::traits::NoCache;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_for(server: &MockServer) -> Session {
        let cache = Arc::new(ExpiringCache::new(Duration::from_secs(60)).unwrap());
        let config = ClientConfig::default().with_base_url(server.uri());
        let client = PokeApiClient::with_config(config, cache.clone()).unwrap();
        Session::with_rng(client, Some(cache), StdRng::seed_from_u64(42))
    }

    async fn run(session: &mut Session, line: &str) -> (Result<Flow>, String) {
        let registry = CommandRegistry::builtin();
        let mut words = line.split_whitespace().map(String::from);
        let name = words.next().unwrap();
        let args: Vec<String> = words.collect();

        let mut out = Vec::new();
        let result = registry.get(&name).unwrap().run(session, &args, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    fn page(server: &MockServer, names: &[&str], next: Option<&str>, previous: Option<&str>) -> serde_json::Value {
        let link = |offset: &str| format!("{}/location-area/?offset={offset}&limit=2", server.uri());
        serde_json::json!({
            "count": 6,
            "next": next.map(link),
            "previous": previous.map(link),
            "results": names.iter().map(|n| serde_json::json!({"name": n, "url": ""})).collect::<Vec<_>>(),
        })
    }

    async fn mount_pokemon(server: &MockServer, name: &str, base_experience: u32) {
        Mock::given(method("GET"))
            .and(path(format!("/pokemon/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "name": name,
                "base_experience": base_experience,
                "height": 7,
                "weight": 69,
                "stats": [{"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}}],
                "types": [
                    {"slot": 2, "type": {"name": "poison", "url": ""}},
                    {"slot": 1, "type": {"name": "grass", "url": ""}}
                ]
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_registry_lookup() {
        let registry = CommandRegistry::builtin();

        for name in ["help", "exit", "map", "mapb", "explore", "catch", "inspect", "pokedex", "cache"] {
            assert_eq!(registry.get(name).map(|c| c.name()), Some(name));
        }
        assert!(registry.get("fly").is_none());
        assert!(registry.get("").is_none());
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let server = MockServer::start().await;
        let mut session = session_for(&server);

        let (result, out) = run(&mut session, "help").await;

        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(out.starts_with("Welcome to the Pokedex!\nUsage:\nhelp: Displays a help message\n"));
        assert!(out.contains("explore <location-name>: Explore a location and see Pokemon"));
        assert!(out.contains("help: Displays a help message"));
        assert!(out.contains("cache: Show response cache statistics"));
    }

    #[tokio::test]
    async fn test_exit() {
        let server = MockServer::start().await;
        let mut session = session_for(&server);

        let (result, out) = run(&mut session, "exit").await;

        assert_eq!(result.unwrap(), Flow::Exit);
        assert_eq!(out, "Closing the Pokedex... Goodbye!\n");
    }

    #[tokio::test]
    async fn test_map_and_mapb_paginate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/location-area/"))
            .and(query_param("offset", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(&server, &["c", "d"], Some("4"), Some("0"))))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/location-area/"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(&server, &["a", "b"], Some("2"), None)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/location-area/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(&server, &["a", "b"], Some("2"), None)))
            .mount(&server)
            .await;

        let mut session = session_for(&server);

        let (_, out) = run(&mut session, "mapb").await;
        assert_eq!(out, "You're on the first page\n");

        let (_, out) = run(&mut session, "map").await;
        assert_eq!(out, "a\nb\n");

        let (_, out) = run(&mut session, "map").await;
        assert_eq!(out, "c\nd\n");

        let (_, out) = run(&mut session, "mapb").await;
        assert_eq!(out, "a\nb\n");

        let (_, out) = run(&mut session, "mapb").await;
        assert_eq!(out, "You're on the first page\n");
    }

    #[tokio::test]
    async fn test_explore() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/location-area/pastoria-city-area"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "pastoria-city-area",
                "pokemon_encounters": [{"pokemon": {"name": "tentacool", "url": ""}}]
            })))
            .mount(&server)
            .await;
        let mut session = session_for(&server);

        let (result, out) = run(&mut session, "explore pastoria-city-area").await;

        result.unwrap();
        assert_eq!(out, "Exploring pastoria-city-area...\nFound Pokemon:\n  - tentacool\n");
    }

    #[tokio::test]
    async fn test_explore_requires_one_argument() {
        let server = MockServer::start().await;
        let mut session = session_for(&server);

        let (result, _) = run(&mut session, "explore").await;
        let err = result.unwrap_err();
        assert!(matches!(err, PokedexError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "explore command requires a location name");

        let (result, _) = run(&mut session, "explore a b").await;
        assert!(matches!(result, Err(PokedexError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_catch_then_inspect() {
        let server = MockServer::start().await;
        // Threshold 100: every roll catches.
        mount_pokemon(&server, "bulbasaur", 0).await;
        let mut session = session_for(&server);

        let (_, out) = run(&mut session, "catch bulbasaur").await;
        assert_eq!(out, "Throwing a Pokeball at bulbasaur...\nbulbasaur was caught!\n");

        let (_, out) = run(&mut session, "catch bulbasaur").await;
        assert!(out.ends_with("bulbasaur is already in your Pokedex!\n"));

        let (_, out) = run(&mut session, "inspect bulbasaur").await;
        assert_eq!(
            out,
            "Name: bulbasaur\nHeight: 7\nWeight: 69\nStats:\n  - hp: 45\nTypes:\n  - grass\n  - poison\n"
        );

        let (_, out) = run(&mut session, "pokedex").await;
        assert_eq!(out, "Your Pokedex:\n  - bulbasaur\n");
    }

    #[tokio::test]
    async fn test_catch_escape() {
        let server = MockServer::start().await;
        // Threshold 0: every roll escapes.
        mount_pokemon(&server, "mewtwo", 5_000).await;
        let mut session = session_for(&server);

        let (_, out) = run(&mut session, "catch mewtwo").await;

        assert_eq!(out, "Throwing a Pokeball at mewtwo...\nmewtwo escaped!\n");
        assert!(session.caught("mewtwo").is_none());
    }

    #[tokio::test]
    async fn test_catch_unknown_pokemon() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let mut session = session_for(&server);

        let (result, out) = run(&mut session, "catch missingno").await;

        assert!(matches!(result, Err(PokedexError::UnexpectedStatus { status: 404, .. })));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_inspect_uncaught() {
        let server = MockServer::start().await;
        let mut session = session_for(&server);

        let (result, _) = run(&mut session, "inspect pikachu").await;

        assert_eq!(result.unwrap_err().to_string(), "you have not caught that pokemon: pikachu");
    }

    #[tokio::test]
    async fn test_cache_status() {
        let server = MockServer::start().await;
        mount_pokemon(&server, "oddish", 0).await;
        let mut session = session_for(&server);
        run(&mut session, "catch oddish").await.0.unwrap();

        let (_, out) = run(&mut session, "cache").await;

        assert!(out.contains("Interval: 60000ms"));
        assert!(out.contains("Entries: 1 (0 expired)"));
        assert!(out.contains("Reaper: running"));
    }

    #[tokio::test]
    async fn test_cache_status_when_disabled() {
        let client = PokeApiClient::new(Arc::new(NoCache)).unwrap();
        let mut session = Session::with_rng(client, None, StdRng::seed_from_u64(1));

        let (result, out) = run(&mut session, "cache").await;

        assert_eq!(result.unwrap(), Flow::Continue);
        assert_eq!(out, "Response cache is disabled\n");
    }
}
