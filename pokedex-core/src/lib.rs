//! # Pokedex Core
//!
//! Core types, errors, and traits shared by every crate in the Pokedex shell.
//!
//! - **Types**: PokeAPI response models and the caught-Pokemon record
//! - **Errors**: a single error enum with typed transport/decode/status variants
//! - **Constants**: API endpoints and cache defaults
//! - **Traits**: the [`ResponseCache`] seam between fetchers and the cache
//!
//! ## Example
//!
//! ```rust
//! use pokedex_core::{LocationAreaPage, PokedexError};
//!
//! let page: LocationAreaPage = serde_json::from_str(
//!     r#"{"count":1,"next":null,"previous":null,"results":[{"name":"canalave-city-area","url":""}]}"#,
//! ).unwrap();
//! assert_eq!(page.results[0].name, "canalave-city-area");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PokedexError, Result};
pub use traits::*;
pub use types::*;
