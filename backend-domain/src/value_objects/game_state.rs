// Abstract game state value object

use serde::{Deserialize, Serialize};

/// Coarse game lifecycle reported by the schedule and live feed endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameState {
    Preview,
    Live,
    Final,
    #[default]
    #[serde(other)]
    Unknown,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Preview => "Preview",
            GameState::Live => "Live",
            GameState::Final => "Final",
            GameState::Unknown => "Unknown",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, GameState::Live)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
