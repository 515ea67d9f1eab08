//! PokeAPI data types.
//!
//! - [`NamedResource`]: the `{ name, url }` pair PokeAPI uses for every reference
//! - [`LocationAreaPage`]: one page of the paginated location-area listing
//! - [`LocationAreaDetail`]: a single location area and its encounters
//! - [`PokemonDetail`]: the full Pokemon resource as returned by the API
//! - [`Pokemon`]: the trimmed record kept in the user's Pokedex

mod location;
mod pokemon;

pub use location::*;
pub use pokemon::*;
