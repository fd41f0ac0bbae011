use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// When to colour terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// CLI configuration.
///
/// Example YAML:
/// ```yaml
/// data_file: /home/me/golf/league-data.json
/// session_ttl: 7d
/// colors: never
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the league JSON lives (default: ~/.config/golf-league/league-data.json)
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// How long a login lasts, humantime format (default: "30d")
    #[serde(default)]
    pub session_ttl: Option<String>,

    #[serde(default)]
    pub colors: ColorMode,
}
