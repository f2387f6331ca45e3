use clap::{Parser, Subcommand};
use crisis_locator::config::Config;
use crisis_locator::error::Result;
use crisis_locator::infra::geonames::GeoNamesClient;
use crisis_locator::infra::picarta::PicartaClient;
use crisis_locator::logging;
use crisis_locator::model::load_model_stack;
use crisis_locator::pipeline::Orchestrator;
use crisis_locator::server;
use crisis_locator::types::RawSubmission;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "crisis_locator")]
#[command(about = "Disaster detection and geolocation for social media posts")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP front end
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Process a single post and print the result as JSON
    Process {
        /// Post text to analyze
        #[arg(long)]
        text: String,
        /// URL of the attached image
        #[arg(long)]
        image_url: String,
    },
}

/// Builds the shared, read-only pipeline. Model loading errors here are
/// startup-fatal: the process must not serve without a working stack.
fn build_orchestrator(config: &Config) -> Result<Arc<Orchestrator>> {
    let stack = load_model_stack(&config.model)?;
    Ok(Arc::new(Orchestrator::new(
        Arc::new(stack.vectorizer),
        Arc::new(stack.classifier),
        Arc::new(stack.tagger),
        Arc::new(PicartaClient::new(config.picarta.clone())),
        Arc::new(GeoNamesClient::new(config.geonames.clone())),
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    let orchestrator = build_orchestrator(&config)?;
    info!("Pipeline initialized");

    match cli.command {
        Commands::Serve { port } => {
            server::run_server(port, orchestrator).await?;
        }
        Commands::Process { text, image_url } => {
            let submission = RawSubmission {
                text,
                image_reference: image_url,
            };
            let result = orchestrator.process(&submission).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
