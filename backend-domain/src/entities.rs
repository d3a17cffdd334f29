// Domain entities
pub mod config;
pub mod feed;
pub mod player;
pub mod schedule;
pub mod season;

pub use config::*;
pub use feed::*;
pub use player::*;
pub use schedule::*;
pub use season::*;
