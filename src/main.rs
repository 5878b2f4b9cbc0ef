use clap::Parser;
use newsfeed::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "newsfeed", about = "Browse the best Hacker News stories from the terminal")]
struct Args {
    /// API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Concurrent item fetches
    #[arg(short, long)]
    workers: Option<usize>,

    /// Stories per page
    #[arg(short, long)]
    page_size: Option<usize>,

    /// Upper bound on stories fetched per refresh
    #[arg(long)]
    max_stories: Option<usize>,

    /// Log file path
    #[arg(long, default_value = "newsfeed.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("newsfeed: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            workers: args.workers,
            page_size: args.page_size,
            max_stories: args.max_stories,
        },
    );

    log::info!(
        "newsfeed starting: base_url={}, workers={}, page_size={}",
        resolved.base_url,
        resolved.workers,
        resolved.page_size
    );

    if let Err(e) = newsfeed::tui::run(resolved) {
        log::error!("Unable to run the terminal UI: {}", e);
        eprintln!("Unable to start newsfeed: {e}");
        std::process::exit(1);
    }
    Ok(())
}
