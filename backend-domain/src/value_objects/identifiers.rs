// Identifier value objects

/// Prefix the live feed uses for player keys in roster and boxscore maps.
pub const PLAYER_KEY_PREFIX: &str = "ID";

pub type GamePk = i64;
pub type PlayerId = i64;
pub type TeamId = i64;

/// Builds the `ID<player id>` key used by the live feed's player maps.
pub fn player_key(player_id: PlayerId) -> String {
    format!("{}{}", PLAYER_KEY_PREFIX, player_id)
}

/// Parses a numeric id coming from a URL segment or config value.
pub fn parse_numeric_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}
