// Domain value objects
pub mod game_state;
pub mod identifiers;

pub use game_state::*;
pub use identifiers::*;
