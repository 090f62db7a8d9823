use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eduhub::Theme;
use eduhub::core::catalog::Catalog;
use eduhub::core::config::{self, CliOverrides};
use eduhub::core::downloads::{DownloadManager, HttpFetcher};
use eduhub::core::state::App;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "eduhub", about = "Terminal study companion: notes, quizzes and resources")]
struct Args {
    /// Directory for downloaded and added files
    #[arg(long)]
    downloads_dir: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Where to write the log
    #[arg(long, default_value = "eduhub.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger (the TUI owns stdout)
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("EduHub v{} starting up", env!("CARGO_PKG_VERSION"));

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        config::EduHubConfig::default()
    });
    let cli = CliOverrides {
        downloads_dir: args.downloads_dir,
        theme: args.theme,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!(
        "Config resolved: downloads_dir={}, theme={:?}, timeout={:?}",
        resolved.downloads_dir.display(),
        resolved.theme,
        resolved.timeout
    );

    let downloads = DownloadManager::open(resolved.downloads_dir.clone())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let fetcher = HttpFetcher::new(resolved.timeout, &resolved.user_agent)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let app = App::new(Arc::new(Catalog::builtin()), Arc::new(fetcher), downloads)
        .with_theme(resolved.theme);

    eduhub::tui::run(app)
}
