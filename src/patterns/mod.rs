// Pattern matching module
// Fuzzy lookup over training inputs with classifier fallback

pub mod fuzzy;
mod lookup;
mod matcher;

pub use lookup::{FuzzyMatch, LookupTable};
pub use matcher::{resolve, resolve_detailed, MatchSource, Resolution};
