use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagpulse::commands::{analyze_file, search};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "tagpulse",
    version,
    about = "Hashtag search analytics: word frequency, locations, engagement and sentiment",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch recent posts for a hashtag and analyze them
    Search {
        /// Hashtag to search for (with or without the leading #)
        hashtag: String,

        /// Maximum posts to fetch (10..=100)
        #[arg(short, long)]
        max_results: Option<u32>,

        /// Days back from now to search (1..=6)
        #[arg(short, long)]
        n_days: Option<i64>,

        /// Restrict results to a language (en, pt)
        #[arg(short, long)]
        lang: Option<String>,

        /// Engagement metric (likes, reposts, combined)
        #[arg(long)]
        metric: Option<String>,

        /// Configuration file path (TOML); environment variables otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the bundle as JSON instead of a text report
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Analyze a corpus from a JSON file of raw post records
    Analyze {
        /// Input corpus file
        input: PathBuf,

        /// Stopword language (en, pt)
        #[arg(short, long)]
        lang: Option<String>,

        /// Print the bundle as JSON instead of a text report
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Search {
            hashtag,
            max_results,
            n_days,
            lang,
            metric,
            config,
            json,
        } => {
            tracing::info!(
                hashtag = %hashtag,
                max_results = ?max_results,
                n_days = ?n_days,
                lang = ?lang,
                "Starting search command"
            );
            search(hashtag, max_results, n_days, lang, metric, config, json).await?;
        }

        Commands::Analyze { input, lang, json } => {
            tracing::info!(input = %input.display(), lang = ?lang, "Starting analyze command");
            analyze_file(input, lang, json).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("tagpulse=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("tagpulse=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
