pub mod ops_handlers;
pub mod player_handlers;

pub use ops_handlers::*;
pub use player_handlers::*;
