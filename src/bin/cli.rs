//! jokebook CLI
//!
//! Local driver for the joke service: fetch a joke, vote, and inspect the
//! top list from a terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jokebook::{
    error::Result,
    models::{Config, JokeId, Vote},
    services::JokeService,
};

/// jokebook - scraped jokes with ratings
#[derive(Parser, Debug)]
#[command(name = "jokebook", version, about = "Scraped joke catalogue with ratings")]
struct Cli {
    /// Path to storage directory containing config and ratings
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a random joke and its id
    Joke,

    /// Vote for a joke by id
    Rate {
        /// Joke id as printed by `joke`
        id: String,
        /// `like` or `dislike`
        vote: String,
    },

    /// Show the best rated jokes
    Top {
        /// Number of jokes (default: ranking.top_n from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Show catalogue and rating counters
    Stats,

    /// Validate configuration and compile extractors
    Validate,

    /// List configured sources in merge order
    Sources,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::debug!("Loaded configuration from {}", cli.storage_dir.display());

    match cli.command {
        Command::Joke => {
            let service = JokeService::open(&config, &cli.storage_dir).await?;
            let reply = service.random_joke().await;
            println!("{}", reply.text);
            if let Some(id) = reply.id {
                let rating = service.rating(&id).await;
                println!();
                println!("id: {id}  (👍 {} | 👎 {})", rating.likes, rating.dislikes);
            }
        }

        Command::Rate { id, vote } => {
            let vote: Vote = vote.parse()?;
            let service = JokeService::open(&config, &cli.storage_dir).await?;
            let record = service.rate(&JokeId::from(id), vote).await;
            println!("👍 {} | 👎 {}", record.likes, record.dislikes);
        }

        Command::Top { count } => {
            let n = count.unwrap_or(config.ranking.top_n);
            let service = JokeService::open(&config, &cli.storage_dir).await?;
            service.load_catalog().await;

            let top = service.top(n).await;
            if top.is_empty() {
                println!("No rated jokes yet.");
            }
            for (i, entry) in top.iter().enumerate() {
                println!("{}. {}", i + 1, entry.text);
                println!(
                    "Rating: {} (👍 {} | 👎 {})",
                    entry.net_score, entry.likes, entry.dislikes
                );
                println!();
            }
        }

        Command::Stats => {
            let service = JokeService::open(&config, &cli.storage_dir).await?;
            service.load_catalog().await;

            let stats = service.stats(0).await;
            println!("Jokes: {}", stats.total_items);
            println!("Votes: {}", stats.total_rating_events);
            if let Some(acquired_at) = stats.acquired_at {
                println!("Acquired: {}", acquired_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} sources)", config.sources.len());
        }

        Command::Sources => {
            for (i, source) in config.sources.iter().enumerate() {
                println!("{}. {} {}", i + 1, source.name, source.url);
            }
        }
    }

    Ok(())
}
