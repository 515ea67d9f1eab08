//! Error types for the Pokedex shell.
//!
//! Cache operations are infallible; everything that can go wrong lives at
//! cache construction or in the fetchers and commands built on top of it.

use thiserror::Error;

/// Result type alias using `PokedexError`.
pub type Result<T> = std::result::Result<T, PokedexError>;

/// Main error type for all Pokedex operations.
#[derive(Debug, Error)]
pub enum PokedexError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Invalid configuration (cache interval, base URL, HTTP client setup).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // FETCH ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The request could not be sent or the body could not be read.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The server answered with something other than 200 OK.
    #[error("Unexpected status code {status} from {url}")]
    UnexpectedStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The payload was not the JSON shape we expected.
    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // COMMAND ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A command was called with the wrong arguments.
    #[error("{0}")]
    InvalidArgument(String),

    /// The Pokemon is not in the Pokedex.
    #[error("you have not caught that pokemon: {0}")]
    NotCaught(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // I/O ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PokedexError {
    /// Returns true if retrying the same request might succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PokedexError::TransportError(_) => true,
            PokedexError::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if the error was caused by what the user typed.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PokedexError::InvalidArgument(_)
                | PokedexError::NotCaught(_)
                | PokedexError::UnexpectedStatus { status: 404, .. }
        )
    }
}
