mod app;
mod banner;
mod catalog;
mod config;
mod daterange;
mod error;
mod theme;
mod timer;
mod ui;
mod widgets;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use catalog::Catalog;
use theme::ThemeMode;

/// Time between frames of the banner animations
const FRAME: Duration = Duration::from_millis(33);

#[derive(Parser, Debug)]
#[command(name = "calcdir")]
#[command(version = "0.1.0")]
#[command(about = "A terminal directory of online calculators")]
struct Args {
    /// Print every calculator as JSON
    #[arg(short, long)]
    list: bool,

    /// Print a category and its calculators as JSON
    #[arg(long, value_name = "ID")]
    category: Option<String>,

    /// Print a single calculator as JSON
    #[arg(long, value_name = "ID")]
    calculator: Option<String>,

    /// Use a catalog file instead of the built-in catalog
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Theme for this session (not saved)
    #[arg(short, long, value_enum)]
    theme: Option<ThemeMode>,

    /// Page to open first, e.g. `all` or `category:finance`
    #[arg(short, long, value_name = "ROUTE")]
    open: Option<String>,
}

impl Args {
    fn is_cli_only(&self) -> bool {
        self.list || self.category.is_some() || self.calculator.is_some()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(!args.is_cli_only());

    // Handle CLI-only commands
    if args.is_cli_only() {
        let catalog = match &args.catalog {
            Some(path) => Catalog::load(path).await?,
            None => Catalog::builtin(),
        };
        return print_catalog(&args, &catalog);
    }

    // Run TUI
    run_tui(args).await
}

/// Log to stderr for CLI commands. The TUI owns the terminal, so it logs to a
/// file in the cache directory instead.
fn init_logging(tui: bool) {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::from_default_env());

    if !tui {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
        return;
    }

    match open_log_file() {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init(),
        None => registry.init(),
    }
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = dirs::cache_dir()?.join("calcdir");
    std::fs::create_dir_all(&dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("calcdir.log"))
        .ok()
}

fn print_catalog(args: &Args, catalog: &Catalog) -> Result<()> {
    let output = if let Some(id) = &args.category {
        serde_json::to_string_pretty(&catalog.category(id)?)?
    } else if let Some(id) = &args.calculator {
        serde_json::to_string_pretty(catalog.calculator(id)?)?
    } else {
        serde_json::to_string_pretty(catalog.calculators())?
    };

    println!("{}", output);
    Ok(())
}

async fn run_tui(args: Args) -> Result<()> {
    // Load before touching the terminal so errors print normally
    let mut app = App::new(args.catalog, args.theme, args.open.as_deref()).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // First measurement before the first frame
    app.on_resize(terminal.size()?.width);
    tracing::info!("calcdir started with {} calculators", app.catalog.calculators().len());

    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => {
                        // Handle key and catch any errors to prevent crashes
                        if let Err(e) = app.handle_key(key) {
                            tracing::warn!("Key handling failed: {}", e);
                        }
                    }
                },
                Event::Resize(width, _) => app.on_resize(width),
                _ => {}
            }
        }
    }
}
