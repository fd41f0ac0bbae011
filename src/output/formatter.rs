use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::config::ColorMode;
use crate::league::{LeagueConfig, LeagueData};
use crate::scoring::{
    get_total_player_count, get_week_score_count, points_multiplier, StandingsRow,
    TeamWeekResult, WeekLeagueResult,
};

const NO_SCORE: &str = "\u{2014}";
const COUNTING_MARK: &str = "\u{25cf}";

/// Resolve the colour mode against whether stdout is a TTY
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Format league points: whole numbers without decimals, fractions (from
/// tie averaging) with up to two places, "—" for a week with no scores.
pub fn format_points(points: Option<f64>) -> String {
    let Some(p) = points else {
        return NO_SCORE.to_string();
    };

    // Sums of fractional points drift (0.7 + 0.2 + 0.1 < 1)
    let rounded = (p * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.2}", rounded)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Entry progress line for a week, e.g. "2 of 6 scores entered."
pub fn format_week_progress(entered: usize, total: usize) -> String {
    if total > 0 && entered == total {
        format!("All {} scores entered.", total)
    } else {
        format!("{} of {} scores entered.", entered, total)
    }
}

/// "1st", "2nd", "3rd", "4th", "11th", "21st"
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// One-line description of the league's rules,
/// e.g. "Stableford · Best 5 scores · Double points final week"
pub fn format_league_summary(config: &LeagueConfig) -> String {
    let mut parts = vec![
        config.scoring_format.label().to_string(),
        format!("Best {} scores", config.best_scores_count),
    ];
    if config.double_points_last_week {
        parts.push("Double points final week".to_string());
    }
    parts.join(" \u{b7} ")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Format the overall standings.
///
/// Columns: rank, team, one column per week (unless `compact`), total.
/// Weeks worth double points are marked with `*`.
pub fn format_standings_table(
    rows: &[StandingsRow],
    config: &LeagueConfig,
    compact: bool,
    use_colors: bool,
) -> String {
    if rows.is_empty() {
        return "No teams configured yet. Run `golf-league team add <name>`.".to_string();
    }

    let week_width = 6;
    let total_width = 7;
    let weeks = if compact { 0 } else { config.number_of_weeks as usize };

    let longest_name = rows.iter().map(|r| r.team_name.chars().count()).max().unwrap_or(4);
    let mut name_width = longest_name.max(4);
    if let Some(term) = get_terminal_width() {
        let fixed = 4 + 2 + weeks * week_width + total_width;
        if term > fixed + 10 {
            name_width = name_width.min(term - fixed);
        }
    }

    let mut header = format!("{:>3}  {}", "#", pad_right("Team", name_width));
    for week in 1..=weeks as u32 {
        let marker = if points_multiplier(config, week) > 1 { "*" } else { "" };
        header.push_str(&format!("{:>width$}", format!("W{}{}", week, marker), width = week_width));
    }
    header.push_str(&format!("{:>width$}", "Pts", width = total_width));

    let mut lines = vec![if use_colors {
        header.dimmed().to_string()
    } else {
        header
    }];

    for row in rows {
        let name = pad_right(&truncate_name(&row.team_name, name_width), name_width);
        let mut line = format!("{:>3}  {}", row.rank, name);
        for total in row.weekly_totals.iter().take(weeks) {
            line.push_str(&format!("{:>width$}", format_points(*total), width = week_width));
        }
        let overall = format!(
            "{:>width$}",
            format_points(Some(row.overall_total)),
            width = total_width
        );
        if use_colors {
            line.push_str(&overall.bold().to_string());
        } else {
            line.push_str(&overall);
        }
        lines.push(line);
    }

    if !compact && config.double_points_last_week {
        lines.push(String::new());
        lines.push("* double points".to_string());
    }

    lines.join("\n")
}

/// Format one week: each team's finish, counting total and every player's
/// card, with counting cards marked.
pub fn format_week_breakdown(
    week_number: u32,
    team_results: &[TeamWeekResult],
    league_results: &[WeekLeagueResult],
    config: &LeagueConfig,
    use_colors: bool,
) -> String {
    let doubled = points_multiplier(config, week_number) > 1;
    let title = if doubled {
        format!("Week {} (double points)", week_number)
    } else {
        format!("Week {}", week_number)
    };

    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    if team_results.is_empty() {
        lines.push("No teams configured yet.".to_string());
        return lines.join("\n");
    }

    for result in team_results {
        lines.push(String::new());

        let placing = league_results
            .iter()
            .find(|r| r.team_id == result.team_id)
            .map(|r| {
                format!(
                    "{} \u{b7} {} pts",
                    ordinal(r.rank),
                    format_points(Some(r.adjusted_league_points))
                )
            })
            .unwrap_or_else(|| "no scores".to_string());

        let header = format!(
            "{}  Best {}: {}  ({})",
            result.team_name, config.best_scores_count, result.counting_total, placing
        );
        lines.push(if use_colors {
            header.bold().to_string()
        } else {
            header
        });

        let name_width = result
            .all_scores
            .iter()
            .map(|s| s.player_name.chars().count())
            .max()
            .unwrap_or(0);

        for entry in &result.all_scores {
            let mark = if entry.counting { COUNTING_MARK } else { " " };
            let score = entry
                .score
                .map(|s| s.to_string())
                .unwrap_or_else(|| NO_SCORE.to_string());
            let line = format!(
                "  {} {}  {:>4}",
                mark,
                pad_right(&entry.player_name, name_width),
                score
            );
            lines.push(if use_colors && entry.counting {
                line.green().to_string()
            } else if use_colors {
                line.dimmed().to_string()
            } else {
                line
            });
        }
    }

    lines.join("\n")
}

/// League overview: summary line, compact standings and week progress.
pub fn format_dashboard(data: &LeagueData, standings: &[StandingsRow], use_colors: bool) -> String {
    let config = &data.config;
    let mut lines = Vec::new();

    lines.push(if use_colors {
        config.league_name.bold().to_string()
    } else {
        config.league_name.clone()
    });
    lines.push(format!(
        "{} teams, {} players, {} weeks \u{b7} {}",
        data.teams.len(),
        get_total_player_count(data),
        config.number_of_weeks,
        format_league_summary(config)
    ));

    if !data.teams.is_empty() {
        lines.push(String::new());
        lines.push("Standings".to_string());
        lines.push(format_standings_table(standings, config, true, use_colors));
    }

    lines.push(String::new());
    lines.push("Weeks".to_string());
    for week in 1..=config.number_of_weeks {
        let count = get_week_score_count(data, week);
        let status = match count {
            0 => "No scores".to_string(),
            1 => "1 score".to_string(),
            n => format!("{} scores", n),
        };
        let marker = if points_multiplier(config, week) > 1 { " 2x" } else { "" };
        let line = format!("  Week {}{:<3}  {}", week, marker, status);
        lines.push(if use_colors && count == 0 {
            line.dimmed().to_string()
        } else {
            line
        });
    }

    if data.teams.is_empty() {
        lines.push(String::new());
        lines.push("No teams yet. Run `golf-league team add <name>` to set up your league.".to_string());
    }

    lines.join("\n")
}

/// Point schedule, one position per line: "1st  8"
pub fn format_points_table(points: &[f64]) -> String {
    if points.is_empty() {
        return "No ranked positions.".to_string();
    }

    points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:>5}  {}", ordinal(i + 1), format_points(Some(*p))))
        .collect::<Vec<_>>()
        .join("\n")
}
