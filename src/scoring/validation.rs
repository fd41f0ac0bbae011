use std::collections::HashSet;

use crate::league::{LeagueConfig, LeagueData};

/// Upper bound for the number of weeks and the best-N count.
pub const MAX_WEEKS: u32 = 20;
pub const MAX_BEST_SCORES: usize = 20;

/// Validate league configuration before it is saved.
/// Returns all validation errors at once (not just the first).
pub fn validate_league_config(config: &LeagueConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.league_name.trim().is_empty() {
        errors.push("config.leagueName: must not be empty".to_string());
    }

    if config.number_of_weeks == 0 || config.number_of_weeks > MAX_WEEKS {
        errors.push(format!(
            "config.numberOfWeeks: must be between 1 and {}, got {}",
            MAX_WEEKS, config.number_of_weeks
        ));
    }

    if config.best_scores_count == 0 || config.best_scores_count > MAX_BEST_SCORES {
        errors.push(format!(
            "config.bestScoresCount: must be between 1 and {}, got {}",
            MAX_BEST_SCORES, config.best_scores_count
        ));
    }

    if let Some(ref points) = config.league_points {
        for (i, value) in points.iter().enumerate() {
            if !value.is_finite() || *value < 0.0 {
                errors.push(format!(
                    "config.leaguePoints[{}]: must be a non-negative number, got {}",
                    i, value
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a whole league snapshot: config plus id uniqueness and week numbering.
///
/// Weeks past `number_of_weeks` are allowed; they are kept when the season is
/// shortened and come back if it is lengthened again.
pub fn validate_league_data(data: &LeagueData) -> Result<(), Vec<String>> {
    let mut errors = validate_league_config(&data.config).err().unwrap_or_default();

    let mut team_ids = HashSet::new();
    let mut player_ids = HashSet::new();
    for (t, team) in data.teams.iter().enumerate() {
        if !team_ids.insert(team.id.as_str()) {
            errors.push(format!("teams[{}].id: duplicate id '{}'", t, team.id));
        }
        for (p, player) in team.players.iter().enumerate() {
            if !player_ids.insert(player.id.as_str()) {
                errors.push(format!(
                    "teams[{}].players[{}].id: duplicate id '{}'",
                    t, p, player.id
                ));
            }
        }
    }

    let mut week_numbers = HashSet::new();
    for (i, week) in data.weeks.iter().enumerate() {
        if week.week_number == 0 {
            errors.push(format!("weeks[{}].weekNumber: must be at least 1", i));
        }
        if !week_numbers.insert(week.week_number) {
            errors.push(format!(
                "weeks[{}].weekNumber: week {} appears more than once",
                i, week.week_number
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
