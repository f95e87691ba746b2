mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, AppEvent, Effect};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::{Result, WidgetError};
use logic::WeatherPipeline;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;
use ui::screens::WeatherScreen;
use ui::ThemeMode;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        init_logging(cli.verbose, None)?;
        Config::setup_interactive()?;
        return Ok(());
    }

    // The TUI owns the terminal, so its logs go to a file
    let log_file = match cli.command {
        None => Some(match cli.log_file.clone() {
            Some(p) => p,
            None => Config::log_dir()?.join("skyglance.log"),
        }),
        Some(_) => cli.log_file.clone(),
    };
    init_logging(cli.verbose, log_file)?;

    let config = match Config::load(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let pipeline = WeatherPipeline::new(&config)?;

    match cli.command {
        Some(Commands::Check) => run_check(&config, &pipeline).await,
        Some(Commands::Show { city }) => run_show(&pipeline, city.or(cli.city)).await,
        Some(Commands::Init) => Ok(()),
        None => {
            let theme = if cli.light {
                ThemeMode::Light
            } else {
                config.ui.theme
            };
            run_tui(App::new(theme), pipeline, cli.city).await
        }
    }
}

fn init_logging(verbose: u8, log_file: Option<PathBuf>) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

async fn run_check(config: &Config, pipeline: &WeatherPipeline) -> Result<()> {
    println!("Configuration OK");
    println!("  theme: {}", config.ui.theme.as_str());

    let status = pipeline.check_connections().await;
    println!(
        "  OpenWeatherMap: {}",
        if status.openweathermap { "OK" } else { "OFFLINE" }
    );
    match status.location {
        Some(coords) => println!("  Location: {}", coords),
        None => println!("  Location: UNAVAILABLE"),
    }

    if !status.all_connected() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_show(pipeline: &WeatherPipeline, city: Option<String>) -> Result<()> {
    let city = match city {
        Some(c) => Some(c),
        None => pipeline.locate_city().await?,
    };

    let Some(city) = city.filter(|c| !c.trim().is_empty()) else {
        eprintln!("Could not determine your city; pass one explicitly.");
        std::process::exit(1);
    };

    let snapshot = pipeline.fetch_weather(&city).await?;
    println!("{}", snapshot);
    Ok(())
}

async fn run_tui(mut app: App, pipeline: WeatherPipeline, city: Option<String>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    for effect in app.start(city.as_deref()) {
        spawn_effect(effect, &pipeline, &tx);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &pipeline, &tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    pipeline: &WeatherPipeline,
    tx: &UnboundedSender<AppEvent>,
    rx: &mut UnboundedReceiver<AppEvent>,
) -> Result<()>
where
    WidgetError: From<B::Error>,
{
    loop {
        terminal.draw(|f| {
            f.render_widget(WeatherScreen::new(app), f.area());
        })?;

        // Handle input with timeout so effect results are picked up
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(effect) = handle_key(app, key) {
                        spawn_effect(effect, pipeline, tx);
                    }
                }
            }
        }

        while let Ok(event) = rx.try_recv() {
            if let Some(effect) = app.handle_event(event) {
                spawn_effect(effect, pipeline, tx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => app.quit(),
        KeyCode::Char('t') if ctrl => app.toggle_theme(),
        KeyCode::F(2) => app.toggle_theme(),
        KeyCode::Esc => app.quit(),
        KeyCode::Enter => return app.submit_search(),
        KeyCode::Backspace => app.search.backspace(),
        KeyCode::Delete => app.search.delete(),
        KeyCode::Left => app.search.left(),
        KeyCode::Right => app.search.right(),
        KeyCode::Home => app.search.home(),
        KeyCode::End => app.search.end(),
        KeyCode::Char(c) if !ctrl => app.search.insert(c),
        _ => {}
    }
    None
}

/// Run an effect on the runtime; failures are logged and never reach the UI.
fn spawn_effect(
    effect: Effect,
    pipeline: &WeatherPipeline,
    tx: &UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    let pipeline = pipeline.clone();
    let tx = tx.clone();

    match effect {
        Effect::Locate => tokio::spawn(async move {
            match pipeline.locate_city().await {
                Ok(Some(city)) => {
                    let _ = tx.send(AppEvent::CityResolved(city));
                }
                Ok(None) => {}
                Err(e @ WidgetError::Geolocation(_)) => {
                    tracing::error!("Geolocation error: {}", e)
                }
                Err(e) => tracing::warn!("City resolution failed: {}", e),
            }
        }),
        Effect::FetchWeather { seq, city } => tokio::spawn(async move {
            match pipeline.fetch_weather(&city).await {
                Ok(snapshot) => {
                    let _ = tx.send(AppEvent::WeatherLoaded { seq, snapshot });
                }
                Err(e) => tracing::warn!(city = %city, "Weather fetch failed: {}", e),
            }
        }),
    }
}
