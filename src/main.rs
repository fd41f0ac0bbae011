use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use golf_league::config::{self, Config};
use golf_league::credentials::{self, AuthError, Credentials, SessionGate};
use golf_league::league::{self, LeagueConfig, LeagueData, ScoringFormat};
use golf_league::output;
use golf_league::scoring;
use golf_league::store::{AuthorizedStore, FallbackStore, FileStore, LeagueStore, StoreError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_STORE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Stableford,
    Strokeplay,
}

impl From<FormatArg> for ScoringFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Stableford => ScoringFormat::Stableford,
            FormatArg::Strokeplay => ScoringFormat::Strokeplay,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// League overview (default if no subcommand)
    Status,
    /// Overall standings with per-week breakdowns
    Standings,
    /// Results for a single week
    Week {
        /// Week number (1-based)
        week: u32,
    },
    /// Enter a player's score for a week, or `-` to clear it
    Score {
        week: u32,
        /// Team id or name
        team: String,
        /// Player id or name
        player: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Add, rename or remove teams
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },
    /// Add, rename or remove players
    Player {
        #[command(subcommand)]
        action: PlayerAction,
    },
    /// Show or change the league setup
    Setup(SetupArgs),
    /// Print the league points schedule
    Points {
        /// Number of ranked teams (defaults to the number of teams)
        teams: Option<usize>,
    },
    /// Print the raw league data as JSON
    Export,
    /// Log in as the league admin
    Login,
    /// End the admin session
    Logout,
}

#[derive(Subcommand, Debug)]
enum TeamAction {
    Add {
        /// Team name (defaults to "Team N")
        name: Option<String>,
    },
    Rename {
        team: String,
        name: String,
    },
    Remove {
        team: String,
    },
}

#[derive(Subcommand, Debug)]
enum PlayerAction {
    Add {
        team: String,
        /// Player name (defaults to "Player N")
        name: Option<String>,
    },
    Rename {
        team: String,
        player: String,
        name: String,
    },
    Remove {
        team: String,
        player: String,
    },
}

#[derive(Args, Debug, Default)]
struct SetupArgs {
    /// League name
    #[arg(long)]
    name: Option<String>,

    /// Scoring format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Number of weeks in the season
    #[arg(long)]
    weeks: Option<u32>,

    /// Number of best scores that count per team each week
    #[arg(long)]
    best: Option<usize>,

    /// Double league points in the final week
    #[arg(long)]
    double_points: Option<bool>,

    /// League points per finishing position, comma separated (e.g. "10,8,6,4")
    #[arg(long, conflicts_with = "clear_points")]
    points: Option<String>,

    /// Go back to the default points schedule
    #[arg(long)]
    clear_points: bool,
}

impl SetupArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.format.is_none()
            && self.weeks.is_none()
            && self.best.is_none()
            && self.double_points.is_none()
            && self.points.is_none()
            && !self.clear_points
    }
}

#[derive(Parser, Debug)]
#[command(name = "golf-league")]
#[command(about = "Golf league scores, league points and standings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/golf-league/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let command = cli.command.unwrap_or(Commands::Status);
    if let Err(e) = run(command, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Store and auth failures get their own exit codes; anything else is bad input.
fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(store_err) = err.downcast_ref::<StoreError>() {
        return match store_err {
            StoreError::Unauthorized => EXIT_AUTH,
            StoreError::Unavailable(_) | StoreError::Corrupt(_) => EXIT_STORE,
        };
    }
    if err.downcast_ref::<AuthError>().is_some() {
        return EXIT_AUTH;
    }
    EXIT_CONFIG
}

fn run(command: Commands, config: &Config) -> Result<()> {
    let credentials = Credentials::from_env();
    let session_path = credentials::get_session_path();
    let use_colors = output::should_use_colors(config.colors);

    let data_path = config.data_path();
    debug!("League data: {}", data_path.display());
    debug!("Session file: {}", session_path.display());

    let store = AuthorizedStore::new(
        FallbackStore::new(FileStore::new(data_path)),
        SessionGate::new(&session_path, &credentials),
    );

    match command {
        Commands::Status => {
            let data = load(&store)?;
            let standings = scoring::compute_standings(&data);
            println!("{}", output::format_dashboard(&data, &standings, use_colors));
            if !store.is_authorized() {
                println!();
                println!("Read-only. Run `golf-league login` to enter scores.");
            }
        }
        Commands::Standings => {
            let data = load(&store)?;
            show_standings(&data, use_colors);
        }
        Commands::Week { week } => {
            let data = load(&store)?;
            check_week(&data.config, week)?;
            show_week(&data, week, use_colors);
        }
        Commands::Score {
            week,
            team,
            player,
            value,
        } => enter_score(&store, week, &team, &player, &value)?,
        Commands::Team { action } => edit_team(&store, action)?,
        Commands::Player { action } => edit_player(&store, action)?,
        Commands::Setup(args) => setup(&store, args)?,
        Commands::Points { teams } => {
            let data = load(&store)?;
            let num_teams = teams.unwrap_or(data.teams.len());
            let points = scoring::resolve_league_points(&data.config, num_teams);
            println!("{}", output::format_points_table(&points));
            if data.config.double_points_last_week {
                println!();
                println!(
                    "Week {} pays double points.",
                    data.config.number_of_weeks
                );
            }
        }
        Commands::Export => {
            let data = store.read()?;
            let json = serde_json::to_string_pretty(&data).context("Failed to serialize league data")?;
            println!("{}", json);
        }
        Commands::Login => login(&credentials, &session_path, config)?,
        Commands::Logout => {
            credentials::logout(&session_path)?;
            println!("Logged out.");
        }
    }

    Ok(())
}

/// Read the league and log (but tolerate) inconsistencies in it.
fn load(store: &impl LeagueStore) -> Result<LeagueData> {
    let data = store.read()?;
    if let Err(problems) = scoring::validate_league_data(&data) {
        for problem in problems {
            warn!("League data: {}", problem);
        }
    }
    Ok(data)
}

fn check_week(config: &LeagueConfig, week: u32) -> Result<()> {
    if week < 1 || week > config.number_of_weeks {
        bail!(
            "Invalid week {}. Must be between 1 and {}.",
            week,
            config.number_of_weeks
        );
    }
    Ok(())
}

fn show_standings(data: &LeagueData, use_colors: bool) {
    let standings = scoring::compute_standings(data);
    println!("{}", output::format_league_summary(&data.config));
    println!();
    println!(
        "{}",
        output::format_standings_table(&standings, &data.config, false, use_colors)
    );

    for week in 1..=data.config.number_of_weeks {
        if scoring::get_week_score_count(data, week) == 0 {
            continue;
        }
        println!();
        show_week(data, week, use_colors);
    }
}

fn show_week(data: &LeagueData, week: u32, use_colors: bool) {
    let team_results = scoring::compute_week_team_results(data, week);
    let league_results = scoring::compute_week_league_points(data, week);
    println!(
        "{}",
        output::format_week_breakdown(week, &team_results, &league_results, &data.config, use_colors)
    );

    let entered = scoring::get_week_score_count(data, week);
    let total = scoring::get_total_player_count(data);
    println!("{}", output::format_week_progress(entered, total));
}

/// `-` (or an empty value) clears the score.
fn parse_score(value: &str) -> Result<Option<i32>> {
    match value.trim() {
        "" | "-" => Ok(None),
        raw => raw
            .parse::<i32>()
            .map(Some)
            .with_context(|| format!("Invalid score '{}'", raw)),
    }
}

fn parse_points(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("Invalid league points value '{}'", s))
        })
        .collect()
}

fn resolve_team<'a>(data: &'a LeagueData, key: &str) -> Result<&'a league::Team> {
    league::find_team(data, key).with_context(|| format!("No team matching '{}'", key))
}

fn resolve_player<'a>(team: &'a league::Team, key: &str) -> Result<&'a league::Player> {
    league::find_player(team, key)
        .with_context(|| format!("No player matching '{}' on team '{}'", key, team.name))
}

fn enter_score(
    store: &impl LeagueStore,
    week: u32,
    team_key: &str,
    player_key: &str,
    value: &str,
) -> Result<()> {
    let local = load(store)?;
    check_week(&local.config, week)?;

    let team = resolve_team(&local, team_key)?;
    let player = resolve_player(team, player_key)?;
    let score = parse_score(value)?;

    let edited = league::set_score(&local, week, &team.id, &player.id, score);

    // Re-read right before writing so only this week is replaced
    let latest = store.read()?;
    let merged = league::merge_week(&latest, &edited, week);
    store.write(&merged)?;

    info!("Week {}: {} / {} = {:?}", week, team.name, player.name, score);
    match score {
        Some(s) => println!("Week {}: {} ({}) scored {}", week, player.name, team.name, s),
        None => println!("Week {}: cleared score for {} ({})", week, player.name, team.name),
    }
    Ok(())
}

fn edit_team(store: &impl LeagueStore, action: TeamAction) -> Result<()> {
    let data = load(store)?;

    match action {
        TeamAction::Add { name } => {
            let (next, id) = league::add_team(&data, name.as_deref().unwrap_or(""));
            store.write(&next)?;
            let team = resolve_team(&next, &id)?;
            println!("Added team {} ({})", team.name, id);
        }
        TeamAction::Rename { team, name } => {
            let found = resolve_team(&data, &team)?;
            let next = league::rename_team(&data, &found.id, &name)?;
            store.write(&next)?;
            println!("Renamed team {} to {}", found.name, name.trim());
        }
        TeamAction::Remove { team } => {
            let found = resolve_team(&data, &team)?;
            let next = league::remove_team(&data, &found.id)?;
            store.write(&next)?;
            println!("Removed team {}", found.name);
        }
    }

    Ok(())
}

fn edit_player(store: &impl LeagueStore, action: PlayerAction) -> Result<()> {
    let data = load(store)?;

    match action {
        PlayerAction::Add { team, name } => {
            let found = resolve_team(&data, &team)?;
            let (next, id) = league::add_player(&data, &found.id, name.as_deref().unwrap_or(""))?;
            store.write(&next)?;
            let player = resolve_team(&next, &found.id).and_then(|t| resolve_player(t, &id))?;
            println!("Added {} to {} ({})", player.name, found.name, id);
        }
        PlayerAction::Rename { team, player, name } => {
            let found = resolve_team(&data, &team)?;
            let member = resolve_player(found, &player)?;
            let next = league::rename_player(&data, &found.id, &member.id, &name)?;
            store.write(&next)?;
            println!("Renamed {} to {}", member.name, name.trim());
        }
        PlayerAction::Remove { team, player } => {
            let found = resolve_team(&data, &team)?;
            let member = resolve_player(found, &player)?;
            let next = league::remove_player(&data, &found.id, &member.id)?;
            store.write(&next)?;
            println!("Removed {} from {}", member.name, found.name);
        }
    }

    Ok(())
}

fn setup(store: &impl LeagueStore, args: SetupArgs) -> Result<()> {
    let data = load(store)?;

    if args.is_empty() {
        print_setup(&data.config);
        return Ok(());
    }

    let mut config = data.config.clone();
    if let Some(name) = args.name {
        config.league_name = name.trim().to_string();
    }
    if let Some(format) = args.format {
        config.scoring_format = format.into();
    }
    if let Some(weeks) = args.weeks {
        config.number_of_weeks = weeks;
    }
    if let Some(best) = args.best {
        config.best_scores_count = best;
    }
    if let Some(double) = args.double_points {
        config.double_points_last_week = double;
    }
    if let Some(points) = args.points {
        config.league_points = Some(parse_points(&points)?);
    }
    if args.clear_points {
        config.league_points = None;
    }

    if let Err(errors) = scoring::validate_league_config(&config) {
        bail!("Invalid league setup:\n  - {}", errors.join("\n  - "));
    }

    let next = league::ensure_weeks(&league::with_config(&data, config));
    store.write(&next)?;
    info!("Saved league setup");

    print_setup(&next.config);
    Ok(())
}

fn print_setup(config: &LeagueConfig) {
    println!("{}", config.league_name);
    println!("{}", output::format_league_summary(config));
    println!("Weeks: {}", config.number_of_weeks);
    match &config.league_points {
        Some(points) => println!(
            "League points: {}",
            points
                .iter()
                .map(|p| output::format_points(Some(*p)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        None => println!("League points: default"),
    }
}

fn login(credentials: &Credentials, session_path: &Path, config: &Config) -> Result<()> {
    let ttl = config.session_ttl()?;
    let (username, password) = credentials::prompt_for_login()?;
    let session = credentials::login(credentials, &username, &password, ttl, session_path)?;
    println!(
        "Logged in until {}",
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}
