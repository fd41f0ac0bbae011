//! Snapshot edits. Every function takes the current snapshot by reference
//! and returns a new one; nothing here mutates its input.

use anyhow::{bail, Result};
use rand::Rng;

use super::types::{LeagueConfig, LeagueData, Player, Team, Week, WeekScore};

const ID_LENGTH: usize = 7;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random short base-36 id for new teams and players.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// A week with an absent entry for every rostered player.
pub fn blank_week(data: &LeagueData, week_number: u32) -> Week {
    let scores = data
        .teams
        .iter()
        .flat_map(|team| {
            team.players.iter().map(move |player| WeekScore {
                player_id: player.id.clone(),
                team_id: team.id.clone(),
                score: None,
            })
        })
        .collect();

    Week { week_number, scores }
}

/// Make sure weeks `1..=number_of_weeks` all exist, keeping any that already do.
pub fn ensure_weeks(data: &LeagueData) -> LeagueData {
    let mut weeks: Vec<Week> = (1..=data.config.number_of_weeks)
        .map(|n| data.week(n).cloned().unwrap_or_else(|| blank_week(data, n)))
        .collect();

    // Weeks beyond the configured range are kept; shrinking the season
    // shouldn't throw away entered scores.
    weeks.extend(
        data.weeks
            .iter()
            .filter(|w| w.week_number == 0 || w.week_number > data.config.number_of_weeks)
            .cloned(),
    );

    LeagueData {
        weeks,
        ..data.clone()
    }
}

/// Enter (or clear, with `None`) one player's score for a week.
pub fn set_score(
    data: &LeagueData,
    week_number: u32,
    team_id: &str,
    player_id: &str,
    score: Option<i32>,
) -> LeagueData {
    let mut next = data.clone();

    let week_index = match next.weeks.iter().position(|w| w.week_number == week_number) {
        Some(i) => i,
        None => {
            next.weeks.push(blank_week(data, week_number));
            next.weeks.len() - 1
        }
    };

    let scores = &mut next.weeks[week_index].scores;
    match scores
        .iter()
        .position(|s| s.player_id == player_id && s.team_id == team_id)
    {
        Some(i) => scores[i].score = score,
        None => scores.push(WeekScore {
            player_id: player_id.to_string(),
            team_id: team_id.to_string(),
            score,
        }),
    }

    next
}

/// Optimistic merge before a write: keep `latest`'s config and teams and
/// overlay only `local`'s copy of one week.
pub fn merge_week(latest: &LeagueData, local: &LeagueData, week_number: u32) -> LeagueData {
    let mut merged = latest.clone();

    if let Some(local_week) = local.week(week_number) {
        match merged.weeks.iter().position(|w| w.week_number == week_number) {
            Some(i) => merged.weeks[i] = local_week.clone(),
            None => merged.weeks.push(local_week.clone()),
        }
    }

    merged
}

/// Add a team. A blank name becomes "Team N". Returns the new snapshot and the team id.
pub fn add_team(data: &LeagueData, name: &str) -> (LeagueData, String) {
    let id = generate_id();
    let name = match name.trim() {
        "" => format!("Team {}", data.teams.len() + 1),
        trimmed => trimmed.to_string(),
    };

    let mut next = data.clone();
    next.teams.push(Team {
        id: id.clone(),
        name,
        players: Vec::new(),
    });
    (next, id)
}

pub fn rename_team(data: &LeagueData, team_id: &str, name: &str) -> Result<LeagueData> {
    let mut next = data.clone();
    let Some(team) = next.teams.iter_mut().find(|t| t.id == team_id) else {
        bail!("No team with id '{}'", team_id);
    };
    team.name = name.trim().to_string();
    Ok(next)
}

/// Remove a team. Its score entries stay in the weeks but no longer match any
/// roster, so they are ignored by scoring.
pub fn remove_team(data: &LeagueData, team_id: &str) -> Result<LeagueData> {
    if !data.teams.iter().any(|t| t.id == team_id) {
        bail!("No team with id '{}'", team_id);
    }
    let mut next = data.clone();
    next.teams.retain(|t| t.id != team_id);
    Ok(next)
}

/// Add a player to a team. A blank name becomes "Player N".
/// Returns the new snapshot and the player id.
pub fn add_player(data: &LeagueData, team_id: &str, name: &str) -> Result<(LeagueData, String)> {
    let mut next = data.clone();
    let Some(team) = next.teams.iter_mut().find(|t| t.id == team_id) else {
        bail!("No team with id '{}'", team_id);
    };

    let id = generate_id();
    let name = match name.trim() {
        "" => format!("Player {}", team.players.len() + 1),
        trimmed => trimmed.to_string(),
    };
    team.players.push(Player {
        id: id.clone(),
        name,
    });
    Ok((next, id))
}

pub fn rename_player(
    data: &LeagueData,
    team_id: &str,
    player_id: &str,
    name: &str,
) -> Result<LeagueData> {
    let mut next = data.clone();
    let Some(team) = next.teams.iter_mut().find(|t| t.id == team_id) else {
        bail!("No team with id '{}'", team_id);
    };
    let Some(player) = team.players.iter_mut().find(|p| p.id == player_id) else {
        bail!("No player with id '{}' on team '{}'", player_id, team.name);
    };
    player.name = name.trim().to_string();
    Ok(next)
}

pub fn remove_player(data: &LeagueData, team_id: &str, player_id: &str) -> Result<LeagueData> {
    let mut next = data.clone();
    let Some(team) = next.teams.iter_mut().find(|t| t.id == team_id) else {
        bail!("No team with id '{}'", team_id);
    };
    if !team.players.iter().any(|p| p.id == player_id) {
        bail!("No player with id '{}' on team '{}'", player_id, team.name);
    }
    team.players.retain(|p| p.id != player_id);
    Ok(next)
}

/// Replace the league configuration.
pub fn with_config(data: &LeagueData, config: LeagueConfig) -> LeagueData {
    LeagueData {
        config,
        ..data.clone()
    }
}
