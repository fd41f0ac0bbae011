use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

use super::aggregate::{compute_team_week_result, TeamWeekResult};
use super::points::resolve_league_points;
use crate::league::{LeagueConfig, LeagueData, ScoringFormat};

/// A ranked team's finish and league points for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekLeagueResult {
    pub team_id: String,
    pub team_name: String,
    pub score_total: i64,
    /// 1-based; tied teams share the rank of the first team in the tie
    pub rank: usize,
    pub league_points: f64,
    /// After the double-points multiplier
    pub adjusted_league_points: f64,
}

/// 2 for the final configured week when double points are on, else 1.
pub fn points_multiplier(config: &LeagueConfig, week_number: u32) -> u32 {
    if config.double_points_last_week && week_number == config.number_of_weeks {
        2
    } else {
        1
    }
}

/// Best-N breakdown for every team in a week.
///
/// A week that hasn't been created yet behaves as if every score were absent,
/// so each team still gets a (scoreless) result.
pub fn compute_week_team_results(data: &LeagueData, week_number: u32) -> Vec<TeamWeekResult> {
    let week_scores = data.week_scores(week_number);
    let multiplier = i64::from(points_multiplier(&data.config, week_number));

    data.teams
        .iter()
        .map(|team| {
            let mut result = compute_team_week_result(team, week_scores, &data.config);
            result.adjusted_total = result.counting_total * multiplier;
            result
        })
        .collect()
}

/// Compare two teams' counting cards (each sorted best first), starting at the
/// worst counting card and working back to the best. A missing card is worse
/// than any real score. `Ordering::Less` means `a` wins.
pub fn compare_tiebreak(a: &[i32], b: &[i32], format: ScoringFormat) -> Ordering {
    let len = a.len().max(b.len());
    let card = |cards: &[i32], i: usize| {
        cards
            .get(i)
            .map(|&v| i64::from(v))
            .unwrap_or_else(|| format.worst_value())
    };

    for i in (0..len).rev() {
        let ordering = format.best_first(card(a, i), card(b, i));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

struct Contender {
    result: TeamWeekResult,
    cards: Vec<i32>,
}

/// Rank every team with at least one entered score and award league points.
///
/// Order is by counting total (best first for the format), then by
/// [`compare_tiebreak`]. Teams still level after the tie-break share a rank
/// and split the points of the positions they span evenly.
pub fn compute_week_league_points(data: &LeagueData, week_number: u32) -> Vec<WeekLeagueResult> {
    let config = &data.config;
    let format = config.scoring_format;

    let mut contenders: Vec<Contender> = compute_week_team_results(data, week_number)
        .into_iter()
        .filter(|result| {
            let keep = result.has_scores();
            if !keep {
                debug!("Week {}: {} has no scores, not ranked", week_number, result.team_name);
            }
            keep
        })
        .map(|result| {
            let cards = result.counting_scores(format);
            Contender { result, cards }
        })
        .collect();

    if contenders.is_empty() {
        return Vec::new();
    }

    let points_table = resolve_league_points(config, contenders.len());
    let multiplier = f64::from(points_multiplier(config, week_number));

    let level = |a: &Contender, b: &Contender| {
        format
            .best_first(a.result.counting_total, b.result.counting_total)
            .then_with(|| compare_tiebreak(&a.cards, &b.cards, format))
    };
    contenders.sort_by(level);

    let mut results = Vec::with_capacity(contenders.len());
    let mut start = 0;
    while start < contenders.len() {
        let mut end = start + 1;
        while end < contenders.len() && level(&contenders[end], &contenders[start]) == Ordering::Equal {
            end += 1;
        }

        let tie_size = end - start;
        let points = points_table[start..end].iter().sum::<f64>() / tie_size as f64;
        if tie_size > 1 {
            debug!(
                "Week {}: {}-way tie at rank {}, {} points each",
                week_number,
                tie_size,
                start + 1,
                points
            );
        }

        for contender in &contenders[start..end] {
            results.push(WeekLeagueResult {
                team_id: contender.result.team_id.clone(),
                team_name: contender.result.team_name.clone(),
                score_total: contender.result.counting_total,
                rank: start + 1,
                league_points: points,
                adjusted_league_points: points * multiplier,
            });
        }

        start = end;
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::{Player, Team, Week, WeekScore};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// League where team `i` has one player per entry in `cards[i]`.
    fn league(format: ScoringFormat, best: usize, cards: &[Vec<Option<i32>>]) -> LeagueData {
        let mut teams = Vec::new();
        let mut scores = Vec::new();
        for (t, team_cards) in cards.iter().enumerate() {
            let team_id = format!("t{}", t + 1);
            let mut players = Vec::new();
            for (p, score) in team_cards.iter().enumerate() {
                let player_id = format!("{}p{}", team_id, p + 1);
                players.push(Player {
                    id: player_id.clone(),
                    name: format!("Player {}", p + 1),
                });
                scores.push(WeekScore {
                    player_id,
                    team_id: team_id.clone(),
                    score: *score,
                });
            }
            teams.push(Team {
                id: team_id,
                name: format!("Team {}", t + 1),
                players,
            });
        }

        LeagueData {
            config: LeagueConfig {
                scoring_format: format,
                best_scores_count: best,
                number_of_weeks: 4,
                double_points_last_week: true,
                ..LeagueConfig::default()
            },
            teams,
            weeks: vec![Week {
                week_number: 1,
                scores,
            }],
        }
    }

    fn summary(results: &[WeekLeagueResult]) -> Vec<(String, usize, f64)> {
        results
            .iter()
            .map(|r| (r.team_id.clone(), r.rank, r.league_points))
            .collect()
    }

    #[test]
    fn test_stableford_higher_total_wins() {
        let data = league(
            ScoringFormat::Stableford,
            2,
            &[vec![Some(30), Some(30)], vec![Some(36), Some(35)], vec![Some(20), Some(33)]],
        );
        let results = compute_week_league_points(&data, 1);
        assert_eq!(
            summary(&results),
            vec![
                ("t2".to_string(), 1, 4.0),
                ("t1".to_string(), 2, 2.0),
                ("t3".to_string(), 3, 1.0),
            ]
        );
        assert_eq!(results[0].score_total, 71);
    }

    #[test]
    fn test_strokeplay_lower_total_wins() {
        let data = league(ScoringFormat::Strokeplay, 1, &[vec![Some(75)], vec![Some(72)]]);
        let results = compute_week_league_points(&data, 1);
        assert_eq!(results[0].team_id, "t2");
        assert_eq!(results[0].score_total, 72);
        assert_eq!(results[1].team_id, "t1");
        assert_eq!(results[1].score_total, 75);
    }

    #[test]
    fn test_tiebreak_on_worst_counting_card() {
        // Both total 70; t2's worst counting card (34) beats t1's (30).
        let data = league(
            ScoringFormat::Stableford,
            2,
            &[vec![Some(40), Some(30)], vec![Some(36), Some(34)]],
        );
        let results = compute_week_league_points(&data, 1);
        assert_eq!(
            summary(&results),
            vec![("t2".to_string(), 1, 2.0), ("t1".to_string(), 2, 1.0)]
        );
    }

    #[test]
    fn test_tiebreak_strokeplay_direction() {
        // Both total 150; t1's worst counting card (76) beats t2's (78).
        let data = league(
            ScoringFormat::Strokeplay,
            2,
            &[vec![Some(74), Some(76)], vec![Some(72), Some(78)]],
        );
        let results = compute_week_league_points(&data, 1);
        assert_eq!(results[0].team_id, "t1");
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].rank, 2);
    }

    #[test]
    fn test_tiebreak_missing_card_loses() {
        // Same total, but t1 only has one counting card.
        let data = league(
            ScoringFormat::Stableford,
            2,
            &[vec![Some(40), None], vec![Some(20), Some(20)]],
        );
        let results = compute_week_league_points(&data, 1);
        assert_eq!(results[0].team_id, "t2");
        assert_eq!(results[1].team_id, "t1");
        assert_eq!(results[1].rank, 2);
    }

    #[test]
    fn test_compare_tiebreak_missing_card_strokeplay() {
        assert_eq!(
            compare_tiebreak(&[70, 80], &[150], ScoringFormat::Strokeplay),
            Ordering::Less
        );
        assert_eq!(
            compare_tiebreak(&[36, 30], &[36, 30], ScoringFormat::Stableford),
            Ordering::Equal
        );
    }

    #[test]
    fn test_three_way_tie_for_second_averages_points() {
        let data = league(
            ScoringFormat::Stableford,
            1,
            &[
                vec![Some(40)],
                vec![Some(35)],
                vec![Some(35)],
                vec![Some(35)],
                vec![Some(20)],
            ],
        );
        let results = compute_week_league_points(&data, 1);
        assert_eq!(
            summary(&results),
            vec![
                ("t1".to_string(), 1, 8.0),
                ("t2".to_string(), 2, 4.0),
                ("t3".to_string(), 2, 4.0),
                ("t4".to_string(), 2, 4.0),
                ("t5".to_string(), 5, 1.0),
            ]
        );
    }

    #[test]
    fn test_scoreless_teams_excluded() {
        let data = league(
            ScoringFormat::Stableford,
            2,
            &[vec![Some(30)], vec![None, None], vec![Some(25)], vec![]],
        );
        let results = compute_week_league_points(&data, 1);
        let ids: Vec<&str> = results.iter().map(|r| r.team_id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
        // Schedule is sized for the two ranked teams.
        assert_eq!(results[0].league_points, 2.0);
        assert_eq!(results[1].league_points, 1.0);
    }

    #[test]
    fn test_empty_week() {
        let data = league(ScoringFormat::Stableford, 2, &[vec![None], vec![None]]);
        assert!(compute_week_league_points(&data, 1).is_empty());
        assert!(compute_week_league_points(&data, 3).is_empty());
        assert!(compute_week_league_points(&data, 99).is_empty());
    }

    #[test]
    fn test_missing_week_still_lists_teams() {
        let data = league(ScoringFormat::Stableford, 2, &[vec![Some(30)], vec![Some(25)]]);
        let results = compute_week_team_results(&data, 2);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.has_scores() && r.counting_total == 0));
    }

    #[test]
    fn test_double_points_last_week() {
        let mut data = league(
            ScoringFormat::Stableford,
            1,
            &[vec![Some(40)], vec![Some(35)], vec![Some(30)], vec![Some(20)]],
        );
        data.weeks.push(Week {
            week_number: 4,
            scores: data.weeks[0].scores.clone(),
        });

        let week_one = compute_week_league_points(&data, 1);
        assert_eq!(week_one[0].league_points, 6.0);
        assert_eq!(week_one[0].adjusted_league_points, 6.0);

        let week_four = compute_week_league_points(&data, 4);
        assert_eq!(week_four[0].league_points, 6.0);
        assert_eq!(week_four[0].adjusted_league_points, 12.0);

        let team_results = compute_week_team_results(&data, 4);
        assert_eq!(team_results[0].counting_total, 40);
        assert_eq!(team_results[0].adjusted_total, 80);
    }

    #[test]
    fn test_no_double_points_when_disabled() {
        let config = LeagueConfig {
            double_points_last_week: false,
            ..LeagueConfig::default()
        };
        assert_eq!(points_multiplier(&config, 4), 1);
        assert_eq!(points_multiplier(&LeagueConfig::default(), 4), 2);
        assert_eq!(points_multiplier(&LeagueConfig::default(), 3), 1);
    }

    #[test]
    fn test_large_totals_rank_without_overflow() {
        let mut data = league(
            ScoringFormat::Stableford,
            2,
            &[vec![Some(2_000_000_000), Some(2_000_000_000)], vec![Some(36), Some(30)]],
        );
        data.weeks[0].week_number = 4;

        let team_results = compute_week_team_results(&data, 4);
        assert_eq!(team_results[0].counting_total, 4_000_000_000);
        assert_eq!(team_results[0].adjusted_total, 8_000_000_000);

        let ranked = compute_week_league_points(&data, 4);
        assert_eq!(ranked[0].team_id, "t1");
        assert_eq!(ranked[0].score_total, 4_000_000_000);
    }

    #[test]
    fn test_override_points_used() {
        let mut data = league(ScoringFormat::Stableford, 1, &[vec![Some(40)], vec![Some(35)]]);
        data.config.league_points = Some(vec![25.0, 18.0, 15.0]);
        let results = compute_week_league_points(&data, 1);
        assert_eq!(results[0].league_points, 25.0);
        assert_eq!(results[1].league_points, 18.0);
    }

    #[test]
    fn test_repeated_calls_identical() {
        let data = league(
            ScoringFormat::Strokeplay,
            2,
            &[vec![Some(74), Some(76)], vec![Some(72), Some(78)], vec![Some(80), None]],
        );
        assert_eq!(
            compute_week_league_points(&data, 1),
            compute_week_league_points(&data, 1)
        );
    }

    proptest! {
        #[test]
        fn prop_identical_cards_share_rank_regardless_of_order(
            cards in prop::collection::vec(prop::option::of(20i32..45), 1..5),
            others in prop::collection::vec(prop::collection::vec(prop::option::of(20i32..45), 1..5), 0..4),
        ) {
            let mut forward = vec![cards.clone(), cards.clone()];
            forward.extend(others.iter().cloned());
            let mut reversed: Vec<Vec<Option<i32>>> = others.iter().rev().cloned().collect();
            reversed.push(cards.clone());
            reversed.push(cards);

            let a = compute_week_league_points(&league(ScoringFormat::Stableford, 3, &forward), 1);
            let b = compute_week_league_points(&league(ScoringFormat::Stableford, 3, &reversed), 1);

            // The twin teams always land on the same rank with the same points.
            let twin = |results: &[WeekLeagueResult], ids: [&str; 2]| {
                let found: Vec<(usize, f64)> = results
                    .iter()
                    .filter(|r| ids.contains(&r.team_id.as_str()))
                    .map(|r| (r.rank, r.league_points))
                    .collect();
                found
            };
            let n = others.len();
            let twins_a = twin(&a, ["t1", "t2"]);
            let forward_twin_ids = [format!("t{}", n + 1), format!("t{}", n + 2)];
            let twins_b = twin(&b, [forward_twin_ids[0].as_str(), forward_twin_ids[1].as_str()]);

            if let [first, second] = twins_a.as_slice() {
                prop_assert_eq!(first, second);
            }
            prop_assert_eq!(twins_a, twins_b);

            let mut points_a: Vec<f64> = a.iter().map(|r| r.league_points).collect();
            let mut points_b: Vec<f64> = b.iter().map(|r| r.league_points).collect();
            points_a.sort_by(|x, y| x.total_cmp(y));
            points_b.sort_by(|x, y| x.total_cmp(y));
            prop_assert_eq!(points_a, points_b);
        }
    }
}
