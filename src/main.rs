mod state;

use crate::state::app_settings::AppSettings;
use crate::state::feed::{EventFeed, describe};
use crate::state::messages::{SessionRequest, SessionResponse};
use crate::state::refresher::PeriodicRefresher;
use crate::state::worker::SessionWorker;
use anyhow::{Context, bail};
use log::{LevelFilter, debug, error, info, warn};
use std::path::PathBuf;
use swehockey_api::{SwehockeyClient, UnifiedGame, export};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    game_id: u64,
    out: PathBuf,
    watch: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(args) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    let settings = AppSettings::load();
    let level = settings.log_level.unwrap_or(LevelFilter::Info).to_string();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
    for warning in &settings.warnings {
        warn!("{warning}");
    }

    let client = SwehockeyClient::new()
        .with_base_url(settings.base_url.as_str())
        .with_rate_limit_delay(settings.rate_limit);

    let (session_req_tx, session_req_rx) = mpsc::channel::<SessionRequest>(100);
    let (session_resp_tx, mut session_resp_rx) = mpsc::channel::<SessionResponse>(100);

    // Session thread
    let worker = SessionWorker::new(client, session_req_rx, session_resp_tx);
    let worker_task = tokio::spawn(worker.run());

    session_req_tx
        .send(SessionRequest::Load { game_id: args.game_id })
        .await
        .context("session worker stopped before the game was loaded")?;

    let mut feed = EventFeed::default();
    let game = match session_resp_rx.recv().await {
        Some(SessionResponse::GameLoaded { game }) => game,
        Some(SessionResponse::Error { message }) => bail!("could not load game {}: {message}", args.game_id),
        Some(other) => bail!("unexpected response while loading: {other:?}"),
        None => bail!("session worker stopped before the game was loaded"),
    };
    log_summary(&game);
    feed.update(&game);
    export::write_json(&game, &args.out)?;
    info!("wrote {}", args.out.display());

    if !args.watch {
        worker_task.abort();
        return Ok(());
    }

    // Periodic refresh thread
    info!("watching game {} every {:?}; ctrl-c to stop", args.game_id, settings.poll_interval);
    let refresher = PeriodicRefresher::new(session_req_tx.clone(), settings.poll_interval);
    let refresher_task = tokio::spawn(refresher.run());

    loop {
        tokio::select! {
            response = session_resp_rx.recv() => match response {
                Some(SessionResponse::GameRefreshed { target, game }) => {
                    for event in feed.update(&game) {
                        info!("{}", describe(event, &game));
                    }
                    debug!("refreshed {target} at {}, {} events seen", feed.updated_at(), feed.seen());
                    if let Err(e) = export::write_json(&game, &args.out) {
                        error!("{e}");
                    }
                }
                Some(SessionResponse::Error { message }) => {
                    error!("refresh failed, keeping previous game: {message}");
                }
                Some(SessionResponse::GameLoaded { game }) => log_summary(&game),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("stopping");
                break;
            }
        }
    }

    refresher_task.abort();
    worker_task.abort();

    Ok(())
}

fn log_summary(game: &UnifiedGame) {
    let (home, away) = (&game.teams.home, &game.teams.away);
    info!(
        "{} {} {}-{} {} ({})",
        game.game.tournament.name, home.name, home.goals, away.goals, away.name, game.game.result.period_results
    );
    if let Some(start) = game.game.start_time() {
        info!("{} at {}", start.format("%Y-%m-%d %H:%M"), game.game.venue);
    }
    info!(
        "{} events, {} goals, {} skaters and {} goalies dressed",
        game.events.len(),
        game.goals().count(),
        game.roster.home.players.len() + game.roster.away.players.len(),
        game.roster.home.goalies.len() + game.roster.away.goalies.len(),
    );
}

/// Parse the command line. Returns None when the invocation was fully handled
/// (help or version); exits with status 2 on bad arguments.
fn handle_cli_args() -> Option<CliArgs> {
    match parse_args(std::env::args().skip(1)) {
        Ok(ParsedArgs::Run(args)) => Some(args),
        Ok(ParsedArgs::Help) => {
            println!("{}", usage_text());
            None
        }
        Ok(ParsedArgs::Version) => {
            println!("hockey-ticker {}", env!("CARGO_PKG_VERSION"));
            None
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

#[derive(Debug, PartialEq)]
enum ParsedArgs {
    Run(CliArgs),
    Help,
    Version,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<ParsedArgs, String> {
    let mut game_id = None;
    let mut out = None;
    let mut watch = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParsedArgs::Help),
            "-V" | "--version" => return Ok(ParsedArgs::Version),
            "-w" | "--watch" => watch = true,
            "-o" | "--out" => {
                let path = args.next().ok_or_else(|| format!("{arg} needs a path"))?;
                out = Some(PathBuf::from(path));
            }
            _ if game_id.is_none() && !arg.starts_with('-') => {
                let id = arg
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid game id: {arg}"))?;
                game_id = Some(id);
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }

    let game_id = game_id.ok_or_else(|| "Missing game id".to_string())?;
    Ok(ParsedArgs::Run(CliArgs {
        game_id,
        out: out.unwrap_or_else(|| PathBuf::from(format!("game_{game_id}.json"))),
        watch,
    }))
}

fn usage_text() -> &'static str {
    "hockey-ticker - export a swehockey.se game as unified JSON

Usage:
  hockey-ticker <game-id> [--out <path>] [--watch]
  hockey-ticker --help
  hockey-ticker --version

Options:
  -o, --out <path>   Output file (default game_<game-id>.json)
  -w, --watch        Keep polling and re-export as the game goes on

Environment:
  HOCKEY_TICKER_BASE_URL       GameTicker base URL (default https://backend-app.swehockey.se/GameTicker)
  HOCKEY_TICKER_RATE_LIMIT_MS  Pause after each request in ms (default 500)
  HOCKEY_TICKER_POLL_SECS      Watch-mode poll interval in seconds (default 30)
  HOCKEY_TICKER_LOG            Log level (default info; RUST_LOG also honored)"
}
