use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use innovo_idp::commands;
use innovo_idp::config::Settings;
use innovo_idp::models::RoiInputs;
use innovo_idp::services::backend::BackendClient;
use innovo_idp::services::state::AppState;

#[derive(Parser)]
#[command(name = "idp")]
#[command(about = "Client for the Innovo intelligent document processing backend")]
#[command(version)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "INNOVO_BASE_URL", default_value = "http://localhost:5001")]
    base_url: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document and print the extracted fields
    Process {
        /// Document to process (JPG, PNG, or PDF, up to 16MB)
        file: PathBuf,
        /// Send the result to the automation system afterwards
        #[arg(long)]
        send: bool,
    },

    /// Show analytics metrics and charts
    Dashboard {
        /// Save a JSON analytics report in the current directory
        #[arg(long)]
        export_json: bool,
        /// Open the CSV export in the browser
        #[arg(long)]
        export_csv: bool,
        /// Hourly labor rate for the cost-savings card
        #[arg(long, env = "INNOVO_HOURLY_RATE", default_value_t = 25.0)]
        hourly_rate: f64,
    },

    /// Estimate savings and return on investment
    Roi {
        /// Documents processed per month
        #[arg(long)]
        monthly_docs: u64,
        /// Hourly labor cost in USD
        #[arg(long)]
        hourly_cost: f64,
        /// Manual processing minutes per document
        #[arg(long)]
        manual_minutes: f64,
        /// One-time implementation cost in USD
        #[arg(long, env = "INNOVO_IMPLEMENTATION_COST", default_value_t = 1000.0)]
        implementation_cost: f64,
    },

    /// Send the current data to the automation system
    Automation,

    /// Watch a folder and process documents as they arrive
    Watch {
        /// Folder to watch
        folder: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "innovo_idp=info"
    } else {
        "innovo_idp=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run(cli).await {
        tracing::error!(error = %err, "command failed");
        commands::notify_error(&err.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::with_base_url(cli.base_url);

    match cli.command {
        Commands::Process { file, send } => {
            let state = AppState::new(settings);
            let backend = BackendClient::new(&state.settings);
            commands::process::run(&state, &backend, &file, send).await
        }
        Commands::Dashboard {
            export_json,
            export_csv,
            hourly_rate,
        } => {
            settings.dashboard_hourly_rate_usd = hourly_rate;
            let state = AppState::new(settings);
            let backend = BackendClient::new(&state.settings);
            commands::dashboard::run(&state, &backend, export_json, export_csv).await
        }
        Commands::Roi {
            monthly_docs,
            hourly_cost,
            manual_minutes,
            implementation_cost,
        } => {
            settings.implementation_cost_usd = implementation_cost;
            let inputs = RoiInputs {
                monthly_documents: monthly_docs,
                hourly_cost_usd: hourly_cost,
                manual_minutes_per_doc: manual_minutes,
            };
            commands::roi::run(&settings, &inputs);
            Ok(())
        }
        Commands::Automation => {
            let backend = BackendClient::new(&settings);
            commands::process::send_to_automation(&backend).await
        }
        Commands::Watch { folder } => {
            let state = AppState::new(settings);
            let backend = BackendClient::new(&state.settings);
            commands::watch::run(&state, &backend, &folder).await
        }
    }
}
