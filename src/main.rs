use clap::Parser;
use model_fetch::cli::Cli;
use model_fetch::config::Config;
use model_fetch::error::Result;
use model_fetch::hub::HuggingFaceHub;
use model_fetch::installer::{DependencyInstaller, PipBackend};
use model_fetch::models::{FetchOutcome, ModelFetcher, ModelReference};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Progress goes to stdout; keep logs quiet unless RUST_LOG asks otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let model = ModelReference::new(cli.model, cli.token)?;

    if config.installer.enabled {
        println!("Installing dependencies...");
        install_dependencies(&config).await?;
    } else {
        tracing::info!("Dependency installation disabled in config");
    }

    println!("Attempting to download model: {model}");
    let hub = HuggingFaceHub::new(&config.hub, &config.fetch);
    let mut fetcher = ModelFetcher::new(hub, config.fetch.extensions.clone());

    match fetcher.fetch(&model).await? {
        FetchOutcome::Completed(report) => {
            println!("{}", report.summary());
            println!("Model installation complete!");
            println!(
                "You can now use the model by specifying '{model}' when loading with transformers"
            );
        }
        FetchOutcome::Failed(reason) => {
            tracing::debug!("Fetch failed: {reason:?}");
            println!("Installation failed. Please check the model name and your access token.");
        }
    }

    Ok(())
}

async fn install_dependencies(config: &Config) -> Result<()> {
    let backend = PipBackend::new(config.installer.python.as_deref())?;
    let installer = DependencyInstaller::from_config(backend, &config.installer)?;
    let summary = installer.ensure_installed().await?;

    tracing::info!(
        "Dependencies ready: {} installed, {} already present",
        summary.installed.len(),
        summary.already_present.len()
    );

    Ok(())
}
