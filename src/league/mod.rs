pub mod edit;
pub mod types;

pub use edit::{
    add_player, add_team, blank_week, ensure_weeks, generate_id, merge_week, remove_player,
    remove_team, rename_player, rename_team, set_score, with_config,
};
pub use types::{
    LeagueConfig, LeagueData, Player, ScoringFormat, Team, Week, WeekScore, LEAGUE_KEY,
};

/// Find a team by id, falling back to a case-insensitive name match.
pub fn find_team<'a>(data: &'a LeagueData, key: &str) -> Option<&'a Team> {
    data.teams
        .iter()
        .find(|t| t.id == key)
        .or_else(|| data.teams.iter().find(|t| t.name.eq_ignore_ascii_case(key)))
}

/// Find a player on a team by id, falling back to a case-insensitive name match.
pub fn find_player<'a>(team: &'a Team, key: &str) -> Option<&'a Player> {
    team.players
        .iter()
        .find(|p| p.id == key)
        .or_else(|| team.players.iter().find(|p| p.name.eq_ignore_ascii_case(key)))
}
