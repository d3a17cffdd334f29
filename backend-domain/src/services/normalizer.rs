// Stat normalization
// Flattens one feed player plus the game's boxscore into a PlayerUpdate

use crate::entities::{
    Boxscore, BoxscorePlayerStats, FeedPlayer, FeedTeams, PlayerStats, PlayerUpdate,
    SeasonStatLine,
};
use crate::value_objects::TeamId;

/// Builds the live part of a player's update.
///
/// Live stat fields stay `None` when the player is in neither boxscore roster,
/// so stored values from earlier cycles survive the upsert. `points` is left
/// unset here; see [`with_season_points`].
pub fn normalize_player(player: &FeedPlayer, teams: &FeedTeams, boxscore: &Boxscore) -> PlayerUpdate {
    let boxscore_entry = boxscore.find_player(player.id);

    let own_team = match &player.current_team {
        Some(team) => Some((team.id, team.name.clone())),
        None => boxscore_entry.map(|(side, _)| {
            let team = teams.side_of(side);
            (team.id, team.name.clone())
        }),
    };

    let stats = boxscore_entry
        .and_then(|(_, entry)| live_stats(&entry.stats))
        .unwrap_or_default();

    PlayerUpdate {
        full_name: Some(player.full_name.clone()).filter(|name| !name.is_empty()),
        current_age: player.current_age,
        primary_number: player.primary_number.clone(),
        position: player
            .primary_position
            .as_ref()
            .map(|position| position.name.clone()),
        team_id: own_team.as_ref().map(|(id, _)| *id),
        team_name: own_team.as_ref().map(|(_, name)| name.clone()),
        current_opponent_team: own_team.as_ref().map(|(id, _)| opponent_team(teams, *id)),
        stats,
    }
}

/// Season points always end up set: a missing season line counts as 0.
pub fn with_season_points(mut update: PlayerUpdate, season: Option<&SeasonStatLine>) -> PlayerUpdate {
    update.stats.points = Some(season.map(|line| line.points).unwrap_or(0));
    update
}

pub fn opponent_team(teams: &FeedTeams, own_team: TeamId) -> TeamId {
    teams.opponent_of(own_team)
}

fn live_stats(stats: &BoxscorePlayerStats) -> Option<PlayerStats> {
    if let Some(skater) = &stats.skater_stats {
        return Some(PlayerStats {
            hits: Some(skater.hits),
            goals: Some(skater.goals),
            points: None,
            assists: Some(skater.assists),
            penalty_minutes: Some(skater.penalty_minutes),
        });
    }
    stats.goalie_stats.as_ref().map(|goalie| PlayerStats {
        hits: None,
        goals: Some(goalie.goals),
        points: None,
        assists: Some(goalie.assists),
        penalty_minutes: Some(goalie.pim),
    })
}
