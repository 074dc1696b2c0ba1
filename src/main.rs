use clap::{Parser, Subcommand};
use configuration::{LogFormat, Settings};
use database::{DbRepository, SeedOutcome, connect, ensure_schema, seed_if_empty};
use web_server::StorageBackend;

/// The main entry point for the Storefront product service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_settings()?;
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings).await,
        Commands::Seed => handle_seed(settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small product catalog service backed by MySQL.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the configured log output format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Create the product table if needed and fill it with the sample catalog when empty.
    Seed,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on (overrides server.host).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides server.port).
    #[arg(long)]
    port: Option<u16>,

    /// Keep products in memory instead of connecting to MySQL.
    #[arg(long)]
    memory: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, mut settings: Settings) -> anyhow::Result<()> {
    let backend = apply_serve_args(args, &mut settings);
    tracing::info!(
        ?backend,
        host = %settings.server.host,
        port = settings.server.port,
        "Starting Storefront server."
    );

    web_server::run_server(settings, backend).await
}

/// Folds command-line overrides into the loaded settings and picks the store.
fn apply_serve_args(args: ServeArgs, settings: &mut Settings) -> StorageBackend {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if args.memory {
        StorageBackend::InMemory
    } else {
        StorageBackend::MySql
    }
}

async fn handle_seed(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        host = %settings.database.host,
        database = %settings.database.name,
        "Seeding product table."
    );
    let pool = connect(&settings.database).await?;
    ensure_schema(&pool).await?;
    let repo = DbRepository::new(pool);

    match seed_if_empty(&repo).await {
        SeedOutcome::Seeded { inserted } => println!("Seeded {inserted} products."),
        SeedOutcome::Skipped { existing } => {
            println!("Table already holds {existing} products; nothing to do.")
        }
        SeedOutcome::Failed => anyhow::bail!("seeding failed; see the log for details"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        configuration::build_settings(None, Default::default()).unwrap()
    }

    #[test]
    fn serve_flags_override_settings_and_pick_the_store() {
        let cli = Cli::parse_from(["storefront", "serve", "--port", "9001", "--memory"]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected the serve subcommand");
        };

        let mut settings = settings();
        let backend = apply_serve_args(args, &mut settings);
        assert_eq!(backend, StorageBackend::InMemory);
        assert_eq!(settings.server.port, 9001);
        assert_eq!(settings.server.host, "0.0.0.0");
    }

    #[test]
    fn serve_defaults_to_mysql() {
        let cli = Cli::parse_from(["storefront", "serve"]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected the serve subcommand");
        };
        assert_eq!(apply_serve_args(args, &mut settings()), StorageBackend::MySql);
    }

    #[test]
    fn log_format_flag_is_global() {
        let cli = Cli::parse_from(["storefront", "seed", "--log-format", "json"]);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(cli.command, Commands::Seed));
    }
}
