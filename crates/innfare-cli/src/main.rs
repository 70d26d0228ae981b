mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use innfare_core::StayParams;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "innfare-cli")]
#[command(about = "Enrich hotel records with live nightly rates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Enrich every hotel in the catalog and print the result as JSON
    Enrich {
        /// Hotel catalog (YAML or JSON); defaults to INNFARE_HOTELS_PATH
        #[arg(long)]
        hotels: Option<PathBuf>,
        #[command(flatten)]
        stay: StayArgs,
        /// Override INNFARE_ENRICH_MAX_CONCURRENT for this run
        #[arg(long)]
        max_concurrent: Option<usize>,
    },
    /// Fetch and reconcile one property's quote, including its trace
    Quote {
        /// Provider property token
        #[arg(long)]
        token: String,
        /// Hotel name forwarded as a search hint
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        stay: StayArgs,
    },
    /// Print the effective configuration (secrets redacted)
    Config,
}

#[derive(Debug, Clone, Args)]
struct StayArgs {
    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    check_in: Option<NaiveDate>,
    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    check_out: Option<NaiveDate>,
    #[arg(long, default_value_t = 2)]
    adults: u32,
    #[arg(long, default_value_t = 0)]
    children: u32,
    #[arg(long, default_value_t = 1)]
    rooms: u32,
}

impl From<StayArgs> for StayParams {
    fn from(args: StayArgs) -> Self {
        Self {
            check_in: args.check_in,
            check_out: args.check_out,
            adults: args.adults,
            children: args.children,
            rooms: args.rooms,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = innfare_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Enrich {
            hotels,
            stay,
            max_concurrent,
        } => commands::run_enrich(config, hotels, stay.into(), max_concurrent).await,
        Commands::Quote { token, name, stay } => {
            commands::run_quote(&config, &token, name.as_deref(), &stay.into()).await
        }
        Commands::Config => commands::run_config(&config),
    }
}
