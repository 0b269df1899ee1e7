mod collect;
mod report;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "revlens")]
#[command(about = "YouTube review collection, analysis, and report synthesis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect and analyze reviews for catalog products
    Collect(collect::CollectArgs),
    /// Synthesize reports from persisted analyses
    Report {
        #[command(subcommand)]
        command: report::ReportCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = revlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = revlens_db::PoolConfig {
        max_connections: config.db_max_connections,
        min_connections: config.db_min_connections,
        acquire_timeout_secs: config.db_acquire_timeout_secs,
    };
    let pool = revlens_db::connect_pool(&config.database_url, pool_config).await?;
    revlens_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Collect(args) => collect::run(&pool, &config, &args).await,
        Commands::Report { command } => report::run(&pool, &config, &command).await,
    }
}
