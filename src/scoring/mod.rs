pub mod aggregate;
pub mod points;
pub mod progress;
pub mod ranking;
pub mod standings;
pub mod validation;

pub use aggregate::{compute_team_week_result, PlayerScore, TeamWeekResult};
pub use points::{generate_default_league_points, resolve_league_points};
pub use progress::{get_total_player_count, get_week_score_count, is_week_complete};
pub use ranking::{
    compare_tiebreak, compute_week_league_points, compute_week_team_results, points_multiplier,
    WeekLeagueResult,
};
pub use standings::{compute_standings, StandingsRow};
pub use validation::{validate_league_config, validate_league_data};
