pub mod normalizer;
pub mod season_selector;

pub use normalizer::*;
pub use season_selector::*;
