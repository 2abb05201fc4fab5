//! sql-provision CLI - provision database schemas from a YAML description.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sql_provision::{ProvisionConfig, ProvisionError, Provisioner};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "sql-provision")]
#[command(about = "Provision databases, schemas and tables on PostgreSQL, MySQL or Redshift")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "provision.yaml")]
    config: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database, schema and tables described in the config
    Provision {
        /// Print the planned DDL without connecting to the engine
        #[arg(long)]
        dry_run: bool,
    },

    /// Test connectivity to the configured engine
    HealthCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), ProvisionError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let config = ProvisionConfig::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    let provisioner = Provisioner::new(config.connection);

    match cli.command {
        Commands::Provision { dry_run } => {
            if dry_run {
                let plan = provisioner.plan(&config.schema)?;
                println!("Planned statements for database '{}':", plan.database);
                for stmt in plan.statements() {
                    println!("  [{}] {}", stmt.stage, stmt.sql);
                }
                return Ok(());
            }

            let report = provisioner.provision(&config.schema).await?;

            if cli.output_json {
                println!("{}", report.to_json()?);
            } else {
                println!("\nProvisioning completed!");
                println!("  Run ID: {}", report.run_id);
                println!("  Engine: {}", report.engine);
                println!("  Database: {}", report.database);
                println!("  Tables: {}", report.tables_created.len());
                println!("  Duration: {:.2}s", report.duration_seconds);
            }
        }

        Commands::HealthCheck => {
            let result = provisioner.health_check().await?;

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Health Check Results:");
                println!(
                    "  Engine: {} ({}ms)",
                    if result.connected { "OK" } else { "FAILED" },
                    result.latency_ms
                );
                if let Some(ref err) = result.error {
                    println!("    Error: {}", err);
                }
            }

            if !result.connected {
                return Err(ProvisionError::Connection(
                    result.error.unwrap_or_else(|| "health check failed".into()),
                ));
            }
        }
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
