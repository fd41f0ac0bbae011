use serde::Serialize;

use super::ranking::{compute_week_league_points, WeekLeagueResult};
use crate::league::LeagueData;

/// One team's line in the overall standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub rank: usize,
    pub team_id: String,
    pub team_name: String,
    /// Adjusted league points per configured week; `None` = no scores that week
    pub weekly_totals: Vec<Option<f64>>,
    pub overall_total: f64,
}

/// Overall standings across weeks `1..=number_of_weeks`.
///
/// League points decide the order in every format: highest total first.
/// Equal totals share a rank and the next total resumes at its position
/// (1, 2, 2, 4).
pub fn compute_standings(data: &LeagueData) -> Vec<StandingsRow> {
    let weekly: Vec<Vec<WeekLeagueResult>> = (1..=data.config.number_of_weeks)
        .map(|week| compute_week_league_points(data, week))
        .collect();

    let mut rows: Vec<StandingsRow> = data
        .teams
        .iter()
        .map(|team| {
            let weekly_totals: Vec<Option<f64>> = weekly
                .iter()
                .map(|results| {
                    results
                        .iter()
                        .find(|r| r.team_id == team.id)
                        .map(|r| r.adjusted_league_points)
                })
                .collect();
            let overall_total = weekly_totals.iter().flatten().sum();

            StandingsRow {
                rank: 0,
                team_id: team.id.clone(),
                team_name: team.name.clone(),
                weekly_totals,
                overall_total,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.overall_total.total_cmp(&a.overall_total));

    for i in 0..rows.len() {
        rows[i].rank = if i > 0 && rows[i].overall_total == rows[i - 1].overall_total {
            rows[i - 1].rank
        } else {
            i + 1
        };
    }

    rows
}
