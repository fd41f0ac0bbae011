use crate::league::LeagueData;

/// True once any score has been entered for the week.
pub fn is_week_complete(data: &LeagueData, week_number: u32) -> bool {
    data.week_scores(week_number)
        .iter()
        .any(|s| s.score.is_some())
}

/// Number of entered scores for the week.
pub fn get_week_score_count(data: &LeagueData, week_number: u32) -> usize {
    data.week_scores(week_number)
        .iter()
        .filter(|s| s.score.is_some())
        .count()
}

pub fn get_total_player_count(data: &LeagueData) -> usize {
    data.teams.iter().map(|t| t.players.len()).sum()
}
