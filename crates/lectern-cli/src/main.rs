//! Lectern - a terminal lesson reader
//!
//! Reads a catalog of lessons, each with a short quiz:
//! - Two-column lesson pages with headings and side images
//! - Mouse wheel scrolling routed to the surface under the pointer
//! - A quiz view per lesson with radio options and a score check

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lectern_core::constants::ui::LOG_FILE_NAME;
use lectern_core::{home_label, paths, Config, ContentProvider, LessonCatalog, LessonId};
use lectern_core::UiRuntimeContext;

mod tui;

/// Lectern - Terminal lesson reader
#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Read lessons and take their quizzes in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to <config dir>/lectern/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lesson catalog TOML file (defaults to the built-in lessons)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Open this lesson at startup
    #[arg(short, long)]
    lesson: Option<LessonId>,

    /// Theme name (overrides the config file)
    #[arg(short, long)]
    theme: Option<String>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Start the reader
    Read,

    /// List lessons in the catalog
    Lessons,

    /// List available themes
    Themes,
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        event::DisableMouseCapture,
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Log to a file, since stdout belongs to the TUI
fn init_logging() {
    let log_dir = paths::logs_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    #[cfg(unix)]
    let null_device = "/dev/null";
    #[cfg(windows)]
    let null_device = "NUL";

    let Ok(log_file) =
        File::create(log_dir.join(LOG_FILE_NAME)).or_else(|_| File::create(null_device))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn load_catalog(path: Option<&PathBuf>) -> Result<LessonCatalog> {
    match path {
        Some(path) => LessonCatalog::load(path)
            .with_context(|| format!("Failed to load lessons from {}", path.display())),
        None => LessonCatalog::embedded().context("Built-in lesson catalog is invalid"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    init_logging();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(paths::config_file);
    let config = Config::load(&config_path)?;
    let theme_name = cli.theme.clone().unwrap_or_else(|| config.theme.clone());

    match cli.command.unwrap_or(Commands::Read) {
        Commands::Themes => {
            println!("Available themes ({}):", tui::THEME_REGISTRY.count());
            for (name, theme) in tui::THEME_REGISTRY.list() {
                println!("  {} - {}", name, theme.display_name);
            }
        }
        Commands::Lessons => {
            let catalog = load_catalog(cli.content.as_ref())?;
            println!("Lessons ({}):", catalog.len());
            for lesson in catalog.lessons() {
                println!(
                    "  {} ({} questions)",
                    home_label(&lesson),
                    lesson.quiz.len()
                );
            }
        }
        Commands::Read => {
            let catalog = load_catalog(cli.content.as_ref())?;
            let theme = tui::THEME_REGISTRY.get_or_default(&theme_name);
            tracing::info!(
                lessons = catalog.len(),
                config = %config_path.display(),
                "Starting Lectern with theme {} ({})",
                theme.display_name,
                theme.name
            );

            let mut runtime = UiRuntimeContext::new(Box::new(catalog), config);
            if let Some(id) = cli.lesson {
                if !runtime.open_lesson(id) {
                    tracing::warn!(lesson_id = id, "Startup lesson not found, showing home");
                }
            }

            let mut app = tui::App::new(runtime, theme.clone());
            app.run().await?;
        }
    }

    Ok(())
}
