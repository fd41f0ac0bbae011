use log::debug;

use crate::league::LeagueConfig;

/// Default league points for `num_teams` ranked teams.
///
/// Position `k` (1-based) earns `2 * (N - k)`, with a floor of 1 so last place
/// still scores: 5 teams -> `[8, 6, 4, 2, 1]`.
pub fn generate_default_league_points(num_teams: usize) -> Vec<f64> {
    (1..=num_teams)
        .map(|position| (2 * (num_teams - position)).max(1) as f64)
        .collect()
}

/// Point schedule to use for a week with `num_teams` ranked teams.
///
/// The configured override is used verbatim when it covers every position;
/// otherwise the generated default is used instead.
pub fn resolve_league_points(config: &LeagueConfig, num_teams: usize) -> Vec<f64> {
    match &config.league_points {
        Some(points) if points.len() >= num_teams => points.clone(),
        Some(points) => {
            debug!(
                "League points override has {} entries for {} ranked teams, using defaults",
                points.len(),
                num_teams
            );
            generate_default_league_points(num_teams)
        }
        None => generate_default_league_points(num_teams),
    }
}
