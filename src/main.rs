mod app;
mod config;
mod data;
mod error;
mod format;
mod pagination;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::ExplorerConfig;
use data::mock::MockProvider;
use data::{DataProvider, PageRequest};

#[derive(Parser, Debug)]
#[command(name = "rubix-explorer")]
#[command(version = "0.1.0")]
#[command(about = "A terminal block explorer for Rubix network transactions, tokens and peers")]
struct Args {
    /// Open the peer view for this peer ID
    #[arg(short, long, conflicts_with = "token")]
    peer: Option<String>,

    /// Open the token view for this token ID
    #[arg(short, long)]
    token: Option<String>,

    /// Seed the mock data generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print network stats and the first page of transactions as JSON and exit
    #[arg(long)]
    snapshot: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so stdout stays clean for --snapshot)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = ExplorerConfig::load()?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let provider = MockProvider::new(config.mock.clone(), config.seed);

    if args.snapshot {
        return print_snapshot(&provider, &config).await;
    }

    ui::init_theme(&config.theme);

    run_tui(provider, config, &args).await
}

async fn print_snapshot(provider: &MockProvider, config: &ExplorerConfig) -> Result<()> {
    let stats = provider.network_stats().await?;
    let volume = provider.volume_series(config.default_time_range).await?;
    let transactions = provider
        .fetch_transactions(PageRequest::new(1, config.page_size))
        .await?;

    let output = serde_json::json!({
        "stats": stats,
        "time_range": config.default_time_range,
        "volume": volume,
        "transactions": transactions,
        "total_pages": transactions.total_pages(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_tui(provider: MockProvider, config: ExplorerConfig, args: &Args) -> Result<()> {
    // Load data before touching the terminal so failures print normally
    let mut app = App::new(provider, config).await?;
    if let Some(peer) = &args.peer {
        app.open_peer(peer).await.with_context(|| format!("Failed to open peer {}", peer))?;
    } else if let Some(token) = &args.token {
        app.open_token(token).await.with_context(|| format!("Failed to open token {}", token))?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<P: DataProvider>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<P>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(app.tick_rate())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.accepts_quit() => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key).await {
                                app.report_error(&e);
                            }
                        }
                    }
                }
            }
        }

        // Animate counters, expire status
        app.tick().await?;
    }
}
