use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Key the whole league is stored under. There is exactly one league.
pub const LEAGUE_KEY: &str = "league-data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub players: Vec<Player>,
}

/// One player's score for one week. `None` means "not entered yet" and is
/// serialized as `null`, never omitted and never `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekScore {
    pub player_id: String,
    pub team_id: String,
    #[serde(default)]
    pub score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub week_number: u32,
    #[serde(default)]
    pub scores: Vec<WeekScore>,
}

/// Which direction is "better" for a raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringFormat {
    /// Higher points are better
    Stableford,
    /// Fewer strokes are better
    Strokeplay,
}

impl ScoringFormat {
    /// Order two values best-first under this format.
    /// `Ordering::Less` means `a` is better than `b`.
    pub fn best_first<T: Ord>(self, a: T, b: T) -> Ordering {
        match self {
            ScoringFormat::Stableford => b.cmp(&a),
            ScoringFormat::Strokeplay => a.cmp(&b),
        }
    }

    /// Value standing in for a missing card: worse than any real score.
    pub fn worst_value(self) -> i64 {
        match self {
            ScoringFormat::Stableford => i64::MIN,
            ScoringFormat::Strokeplay => i64::MAX,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoringFormat::Stableford => "Stableford",
            ScoringFormat::Strokeplay => "Stroke Play",
        }
    }
}

impl fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueConfig {
    pub league_name: String,
    pub scoring_format: ScoringFormat,
    pub number_of_weeks: u32,
    pub best_scores_count: usize,
    pub double_points_last_week: bool,

    /// Points per finishing position (index 0 = 1st place).
    /// Ignored for a week when shorter than the number of ranked teams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league_points: Option<Vec<f64>>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            league_name: "Winter Golf League".to_string(),
            scoring_format: ScoringFormat::Stableford,
            number_of_weeks: 4,
            best_scores_count: 5,
            double_points_last_week: true,
            league_points: None,
        }
    }
}

/// Root aggregate, read and written as a whole by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueData {
    pub config: LeagueConfig,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub weeks: Vec<Week>,
}

impl LeagueData {
    pub fn week(&self, week_number: u32) -> Option<&Week> {
        self.weeks.iter().find(|w| w.week_number == week_number)
    }

    /// Score entries for a week; empty when the week hasn't been created.
    pub fn week_scores(&self, week_number: u32) -> &[WeekScore] {
        self.week(week_number)
            .map(|w| w.scores.as_slice())
            .unwrap_or(&[])
    }
}
