use serde::Serialize;

use crate::league::{LeagueConfig, ScoringFormat, Team, WeekScore};

/// One rostered player's entry for a week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub player_id: String,
    pub player_name: String,
    pub score: Option<i32>,
    pub counting: bool,
}

/// A team's week: every player's entry plus the best-N total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamWeekResult {
    pub team_id: String,
    pub team_name: String,
    /// Roster order, not score order
    pub all_scores: Vec<PlayerScore>,
    pub counting_total: i64,
    /// `counting_total` after the week's points multiplier
    pub adjusted_total: i64,
}

impl TeamWeekResult {
    /// True when at least one player has an entered score.
    pub fn has_scores(&self) -> bool {
        self.all_scores.iter().any(|s| s.score.is_some())
    }

    /// The counting cards, best first under `format`.
    pub fn counting_scores(&self, format: ScoringFormat) -> Vec<i32> {
        let mut cards: Vec<i32> = self
            .all_scores
            .iter()
            .filter(|s| s.counting)
            .filter_map(|s| s.score)
            .collect();
        cards.sort_by(|a, b| format.best_first(*a, *b));
        cards
    }
}

/// Pick the best `best_scores_count` entered scores for one team and total them.
///
/// Entries for other teams, or for players not on the roster, are ignored.
/// Absent scores never count; a team with fewer entered scores than
/// `best_scores_count` counts all of them.
pub fn compute_team_week_result(
    team: &Team,
    week_scores: &[WeekScore],
    config: &LeagueConfig,
) -> TeamWeekResult {
    let format = config.scoring_format;

    let mut all_scores: Vec<PlayerScore> = team
        .players
        .iter()
        .map(|player| {
            let score = week_scores
                .iter()
                .find(|s| s.team_id == team.id && s.player_id == player.id)
                .and_then(|s| s.score);
            PlayerScore {
                player_id: player.id.clone(),
                player_name: player.name.clone(),
                score,
                counting: false,
            }
        })
        .collect();

    // (roster index, score) for entered scores, best first. Stable sort keeps
    // roster order among equal scores.
    let mut valid: Vec<(usize, i32)> = all_scores
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.score.map(|score| (i, score)))
        .collect();
    valid.sort_by(|a, b| format.best_first(a.1, b.1));

    let mut counting_total: i64 = 0;
    for &(index, score) in valid.iter().take(config.best_scores_count) {
        all_scores[index].counting = true;
        counting_total += i64::from(score);
    }

    TeamWeekResult {
        team_id: team.id.clone(),
        team_name: team.name.clone(),
        all_scores,
        counting_total,
        adjusted_total: counting_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Player;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn team_of(n: usize) -> Team {
        Team {
            id: "t1".to_string(),
            name: "Eagles".to_string(),
            players: (1..=n)
                .map(|i| Player {
                    id: format!("p{}", i),
                    name: format!("Player {}", i),
                })
                .collect(),
        }
    }

    fn entries(scores: &[Option<i32>]) -> Vec<WeekScore> {
        scores
            .iter()
            .enumerate()
            .map(|(i, score)| WeekScore {
                player_id: format!("p{}", i + 1),
                team_id: "t1".to_string(),
                score: *score,
            })
            .collect()
    }

    fn config(format: ScoringFormat, best: usize) -> LeagueConfig {
        LeagueConfig {
            scoring_format: format,
            best_scores_count: best,
            ..LeagueConfig::default()
        }
    }

    #[test]
    fn test_stableford_counts_highest() {
        let team = team_of(4);
        let scores = entries(&[Some(30), Some(38), Some(25), Some(34)]);
        let result = compute_team_week_result(&team, &scores, &config(ScoringFormat::Stableford, 2));

        assert_eq!(result.counting_total, 72);
        let counting: Vec<&str> = result
            .all_scores
            .iter()
            .filter(|s| s.counting)
            .map(|s| s.player_id.as_str())
            .collect();
        assert_eq!(counting, vec!["p2", "p4"]);
    }

    #[test]
    fn test_strokeplay_counts_lowest() {
        let team = team_of(4);
        let scores = entries(&[Some(80), Some(72), Some(90), Some(75)]);
        let result = compute_team_week_result(&team, &scores, &config(ScoringFormat::Strokeplay, 2));
        assert_eq!(result.counting_total, 147);
        assert!(result.all_scores[1].counting);
        assert!(result.all_scores[3].counting);
        assert!(!result.all_scores[2].counting);
    }

    #[test]
    fn test_fewer_scores_than_best_count() {
        let team = team_of(4);
        let scores = entries(&[Some(30), None, Some(20), None]);
        let result = compute_team_week_result(&team, &scores, &config(ScoringFormat::Stableford, 3));
        assert_eq!(result.counting_total, 50);
        assert_eq!(result.all_scores.iter().filter(|s| s.counting).count(), 2);
    }

    #[test]
    fn test_absent_is_not_zero() {
        // Under stroke play a zero would be the best possible card.
        let team = team_of(3);
        let scores = entries(&[Some(80), None, Some(85)]);
        let result = compute_team_week_result(&team, &scores, &config(ScoringFormat::Strokeplay, 2));
        assert_eq!(result.counting_total, 165);
        assert!(!result.all_scores[1].counting);
        assert_eq!(result.all_scores[1].score, None);
    }

    #[test]
    fn test_empty_team() {
        let team = team_of(0);
        let result = compute_team_week_result(&team, &[], &config(ScoringFormat::Stableford, 5));
        assert_eq!(result.counting_total, 0);
        assert!(result.all_scores.is_empty());
        assert!(!result.has_scores());
    }

    #[test]
    fn test_ignores_entries_for_other_teams() {
        let team = team_of(2);
        let mut scores = entries(&[Some(30), None]);
        scores.push(WeekScore {
            player_id: "p2".to_string(),
            team_id: "t9".to_string(),
            score: Some(44),
        });
        scores.push(WeekScore {
            player_id: "stranger".to_string(),
            team_id: "t1".to_string(),
            score: Some(50),
        });

        let result = compute_team_week_result(&team, &scores, &config(ScoringFormat::Stableford, 5));
        assert_eq!(result.counting_total, 30);
        assert_eq!(result.all_scores.len(), 2);
        assert_eq!(result.all_scores[1].score, None);
    }

    #[test]
    fn test_equal_scores_keep_roster_order() {
        let team = team_of(3);
        let scores = entries(&[Some(30), Some(32), Some(30)]);
        let result = compute_team_week_result(&team, &scores, &config(ScoringFormat::Stableford, 2));
        assert!(result.all_scores[0].counting);
        assert!(result.all_scores[1].counting);
        assert!(!result.all_scores[2].counting);
    }

    #[test]
    fn test_counting_scores_best_first() {
        let team = team_of(4);
        let scores = entries(&[Some(80), Some(72), Some(90), Some(75)]);
        let result = compute_team_week_result(&team, &scores, &config(ScoringFormat::Strokeplay, 3));
        assert_eq!(result.counting_scores(ScoringFormat::Strokeplay), vec![72, 75, 80]);
    }

    #[test]
    fn test_large_scores_do_not_overflow() {
        let team = team_of(2);
        let scores = entries(&[Some(2_000_000_000), Some(2_000_000_000)]);
        let result = compute_team_week_result(&team, &scores, &config(ScoringFormat::Stableford, 2));
        assert_eq!(result.counting_total, 4_000_000_000);
    }

    proptest! {
        #[test]
        fn prop_counts_exactly_best_n(
            scores in prop::collection::vec(prop::option::of(0i32..60), 0..10),
            best in 1usize..8,
        ) {
            let team = team_of(scores.len());
            let week = entries(&scores);
            let result = compute_team_week_result(&team, &week, &config(ScoringFormat::Stableford, best));

            let mut present: Vec<i32> = scores.iter().flatten().copied().collect();
            present.sort_by(|a, b| b.cmp(a));
            let expected: i64 = present.iter().take(best).map(|&s| i64::from(s)).sum();
            let counted = result.all_scores.iter().filter(|s| s.counting).count();

            prop_assert_eq!(result.counting_total, expected);
            prop_assert_eq!(counted, present.len().min(best));
        }
    }
}
