pub mod formatter;

pub use formatter::{
    format_dashboard, format_league_summary, format_points, format_points_table,
    format_standings_table, format_week_breakdown, format_week_progress, ordinal, should_use_colors,
};
