//! FlixTUI - StreamFlix catalog in the terminal
//!
//! Browse trending movies and TV shows from TMDB, keep a watchlist and
//! continue-watching progress per local account, and open trailers in the
//! browser or mpv.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! flixtui
//!
//! # CLI mode (for automation)
//! flixtui search "the bear"
//! flixtui info 603 --media-type movie --json
//! flixtui watchlist add 1396 --media-type tv
//! ```

use std::io::{stdout, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flixtui::app::{perform, App, PlaybackClock, Request, Response};
use flixtui::api::TmdbClient;
use flixtui::cli::{Cli, Command, ExitCode, Output};
use flixtui::commands::{self, CommandContext};
use flixtui::store::Store;
use flixtui::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

const LOG_FILE: &str = "flixtui.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = CommandContext::from_cli(&cli);
    init_tracing(&ctx.data_dir);

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &ctx).await;
        std::process::exit(exit_code.into());
    } else {
        run_tui(&ctx).await
    }
}

/// Log to a file in the data directory; stdout belongs to the TUI or to JSON output
fn init_tracing(data_dir: &Path) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file = std::fs::create_dir_all(data_dir).and_then(|_| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(LOG_FILE))
    });

    match file {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %data_dir.join(LOG_FILE).display(), "Logging initialized");
        }
        // No log file: drop logs rather than write over the terminal
        Err(_) => tracing_subscriber::registry().with(env_filter).init(),
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, ctx: &CommandContext) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Home(cmd)) => commands::home_cmd(cmd, ctx, &output).await,
        Some(Command::Trending(cmd)) => commands::trending_cmd(cmd, ctx, &output).await,
        Some(Command::Popular(cmd)) => commands::popular_cmd(cmd, ctx, &output).await,
        Some(Command::TopRated(cmd)) => commands::top_rated_cmd(cmd, ctx, &output).await,
        Some(Command::NowPlaying(cmd)) => commands::now_playing_cmd(cmd, ctx, &output).await,
        Some(Command::Upcoming(cmd)) => commands::upcoming_cmd(cmd, ctx, &output).await,
        Some(Command::Discover(cmd)) => commands::discover_cmd(cmd, ctx, &output).await,
        Some(Command::Genres(cmd)) => commands::genres_cmd(cmd, ctx, &output).await,
        Some(Command::Search(cmd)) => {
            if cmd.query.trim().is_empty() {
                return output.error("Search query cannot be empty", ExitCode::InvalidArgs);
            }
            commands::search_cmd(cmd, ctx, &output).await
        }
        Some(Command::Info(cmd)) => commands::info_cmd(cmd, ctx, &output).await,
        Some(Command::Trailer(cmd)) => commands::trailer_cmd(cmd, ctx, &output).await,
        Some(Command::Videos(cmd)) => commands::videos_cmd(cmd, ctx, &output).await,
        Some(Command::Credits(cmd)) => commands::credits_cmd(cmd, ctx, &output).await,
        Some(Command::Similar(cmd)) => commands::similar_cmd(cmd, ctx, &output).await,
        Some(Command::Recommended(cmd)) => commands::recommended_cmd(cmd, ctx, &output).await,
        Some(Command::Config(cmd)) => commands::config_cmd(cmd, ctx, &output),

        Some(Command::Signup(cmd)) => commands::signup_cmd(cmd, ctx, &output),
        Some(Command::Signin(cmd)) => commands::signin_cmd(cmd, ctx, &output),
        Some(Command::Signout(cmd)) => commands::signout_cmd(cmd, ctx, &output),
        Some(Command::Whoami) => commands::whoami_cmd(ctx, &output),
        Some(Command::Profiles(cmd)) => commands::profiles_cmd(cmd, ctx, &output),

        Some(Command::Watchlist(cmd)) => commands::watchlist_cmd(cmd, ctx, &output).await,
        Some(Command::ContinueWatching(cmd)) => commands::continue_cmd(cmd, ctx, &output).await,
        Some(Command::Watch(cmd)) => commands::watch_cmd(cmd, ctx, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(ctx: &CommandContext) -> Result<()> {
    let Some(client) = ctx.client() else {
        anyhow::bail!(
            "No TMDB API key. Set {} or add tmdb_api_key to your config file.",
            flixtui::config::API_KEY_ENV
        );
    };

    let mut terminal = init_terminal()?;

    let mut app = App::new(Store::open(&ctx.data_dir));
    tracing::info!(screen = ?app.screen, "starting TUI");

    let result = run_event_loop(&mut terminal, &mut app, client).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, runs requests, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: TmdbClient) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();
    let mut clock = PlaybackClock::new(Instant::now());

    while app.running {
        for request in app.take_requests() {
            spawn_request(&client, request, tx.clone());
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so finished requests get drawn
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Ok(response) = rx.try_recv() {
            app.apply(response);
        }

        let secs = clock.take_secs(Instant::now());
        if secs > 0 {
            app.tick(secs);
        }
    }

    tracing::info!("exiting TUI");
    Ok(())
}

fn spawn_request(client: &TmdbClient, request: Request, tx: mpsc::UnboundedSender<Response>) {
    let client = client.clone();
    tokio::spawn(async move {
        let response = perform(&client, request).await;
        // Receiver is gone only when the app is shutting down
        let _ = tx.send(response);
    });
}
