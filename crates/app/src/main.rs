use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context as _;
use bookconnect_application::Browser;
use bookconnect_core::{Settings, Theme};
use bookconnect_storage::Storage;
use bookconnect_ui::Ui;
use clap::Parser;
use directories::ProjectDirs;

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Browse the book catalog in the terminal.
#[derive(Debug, Parser)]
#[command(name = "bookconnect", version)]
struct Args {
    /// Config file (defaults to config.json in the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog JSON file to browse instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Previews revealed per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Preferred theme: day or night
    #[arg(long)]
    theme: Option<Theme>,

    /// Override dark-mode detection of the terminal
    #[arg(long)]
    system_dark: Option<bool>,
}

fn main() {
    if let Err(err) = run() {
        tracing::error!(error = ?err, "bookconnect failed");
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let project_dirs =
        ProjectDirs::from("dev", "bookconnect", "bookconnect").context("resolve project dirs")?;

    init_logging(project_dirs.data_dir());

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| project_dirs.config_dir().join("config.json"));
    let storage = Storage::open(&config_path);
    let mut settings = storage
        .load_settings()
        .with_context(|| format!("load config {}", config_path.display()))?;
    apply_args(&mut settings, &args);

    let catalog = storage.load_catalog(&settings).context("load catalog")?;
    let system_prefers_dark = settings
        .system_prefers_dark
        .unwrap_or_else(|| detect_dark_terminal(std::env::var("COLORFGBG").ok().as_deref()));
    tracing::info!(
        books = catalog.len(),
        page_size = settings.page_size,
        theme = %settings.theme,
        system_prefers_dark,
        "bookconnect starting"
    );

    let browser = Browser::new(catalog, &settings, system_prefers_dark);
    let mut ui = Ui::new(browser);
    ui.run()?;

    tracing::info!("bookconnect exited");
    Ok(())
}

fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(path) = &args.catalog {
        settings.catalog_path = Some(path.to_string_lossy().to_string());
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if let Some(dark) = args.system_dark {
        settings.system_prefers_dark = Some(dark);
    }
    settings.normalize();
}

/// Reads the `COLORFGBG` convention (`fg;bg` or `fg;default;bg`). Background
/// colors 0-6 and 8 are the dark half of the 16-color palette.
fn detect_dark_terminal(colorfgbg: Option<&str>) -> bool {
    colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

/// Logs go to a file so they never draw over the terminal UI.
fn init_logging(log_dir: &Path) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    let log_path = log_dir.join("bookconnect.log");
    let file = fs::create_dir_all(log_dir).and_then(|()| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    match file {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(err) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!(error = %err, "failed to open log file; using stderr");
        }
    }
}
