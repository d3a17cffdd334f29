pub mod clickhouse_players;
pub mod memory_players;

pub use clickhouse_players::*;
pub use memory_players::*;
