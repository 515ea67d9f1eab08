//! Pokedex CLI
//!
//! Interactive shell for browsing PokeAPI locations and catching Pokemon.

mod commands;
mod repl;
mod session;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_cache::{CacheConfig, ExpiringCache};
use pokedex_client::{ClientConfig, PokeApiClient};
use pokedex_core::constants::DEFAULT_CACHE_INTERVAL_MS;
use pokedex_core::traits::{NoCache, ResponseCache};

use repl::Repl;
use session::Session;

/// Pokedex - explore PokeAPI from your terminal
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// How long API responses stay cached, in milliseconds
    #[arg(long, env = "POKEDEX_CACHE_INTERVAL_MS", default_value_t = DEFAULT_CACHE_INTERVAL_MS)]
    cache_interval_ms: u64,

    /// Disable the response cache
    #[arg(long)]
    no_cache: bool,

    /// PokeAPI root URL (overrides POKEAPI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pokedex=debug,info"
    } else {
        "pokedex=warn,error"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cache = if cli.no_cache {
        None
    } else {
        let config = CacheConfig {
            interval_ms: cli.cache_interval_ms,
        };
        Some(Arc::new(
            ExpiringCache::with_config(config).context("Failed to create response cache")?,
        ))
    };
    let response_cache: Arc<dyn ResponseCache> = match &cache {
        Some(cache) => Arc::clone(cache) as Arc<dyn ResponseCache>,
        None => Arc::new(NoCache),
    };

    let mut client_config = ClientConfig::from_env();
    if let Some(url) = cli.base_url {
        client_config = client_config.with_base_url(url);
    }
    let client = PokeApiClient::with_config(client_config, response_cache)
        .context("Failed to create PokeAPI client")?;

    println!("{}", "Welcome to the Pokedex! Type 'help' for commands.".cyan().bold());

    let mut repl = Repl::new(Session::new(client, cache));
    let stdin = BufReader::new(tokio::io::stdin());
    repl.run(stdin, &mut std::io::stdout())
        .await
        .context("Input loop failed")?;

    // The client holds the other cache reference; drop it with the session.
    let cache = repl.into_session().into_cache();
    if let Some(cache) = cache.and_then(|c| Arc::try_unwrap(c).ok()) {
        cache.shutdown().await;
    }

    Ok(())
}
