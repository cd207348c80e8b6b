mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trigger_core::storage::{ConfigStorage, init_config_dir};
use trigger_core::{CommandMode, Config, Key, Session};
use ui::TerminalRenderer;

type Backend = CrosstermBackend<Stdout>;

fn setup_logging(level: &str) -> Result<()> {
    let mut log_path = std::env::temp_dir();
    log_path.push("trigger-tui.log");

    let log_file = std::fs::File::create(log_path)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("trigger={level},trigger_core={level}")))?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();

        tracing::error!(?panic_info, "Application panicked");

        eprintln!("A fatal error occurred: {}", panic_info);

        original_hook(panic_info);
    }));
}

#[derive(Parser, Debug)]
#[command(name = "trigger")]
#[command(about = "Trigger - named stopwatches in your terminal", long_about = None)]
struct Args {
    /// Config file (defaults to <config dir>/trigger/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Command style: explicit (":" command line) or implicit (single keys)
    #[arg(short, long)]
    mode: Option<CommandMode>,

    #[arg(short, long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<Config> {
    let storage = match &args.config {
        Some(path) => ConfigStorage::from_path(path),
        None => ConfigStorage::new(init_config_dir()?),
    };
    let mut config = storage
        .load()
        .with_context(|| format!("Failed to load config from {}", storage.path().display()))?;

    if let Some(mode) = args.mode {
        config.command_mode = mode;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Terminal events are read on a plain thread; `event::read` blocks.
fn spawn_event_reader() -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!("Failed to read terminal event: {}", e);
                break;
            }
        }
    });
    rx
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        _ => None,
    }
}

async fn run(
    session: &mut Session<TerminalRenderer<Backend>>,
    mut events: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    session.redraw().await?;

    while let Some(event) = events.recv().await {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(key) = map_key(key.code) {
                    session.handle_key(key).await?;
                }
            }
            Event::Resize(width, height) => {
                info!(width, height, "Terminal resized");
                session.redraw().await?;
            }
            _ => {}
        }

        if session.should_quit() {
            break;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    setup_logging(&config.log_level)?;
    setup_panic_hook();

    let terminal = setup_terminal()?;
    let renderer = TerminalRenderer::new(terminal, config.layout.clone(), &config.colors);
    let mut session = Session::new(&config, renderer);
    info!(mode = %session.mode(), "Trigger starting up");

    let result = run(&mut session, spawn_event_reader()).await;
    drop(session);

    restore_terminal()?;
    info!("Trigger shut down");

    result
}
