use anyhow::Context;
use chrono::Local;
use clap::Parser;
use ferry_scrape::utils::{logger, validation::Validate};
use ferry_scrape::{
    CliConfig, HttpSource, LocalStorage, ScrapeEngine, ScrapePipeline, SyntheticSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ferry-scrape CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let fetcher = HttpSource::new(
        config.api_endpoint.clone(),
        config.origin.clone(),
        config.destination.clone(),
        config.retry_attempts,
    )
    .context("failed to build HTTP client")?;
    let fallback = SyntheticSource::new(Local::now().date_naive());
    let pipeline = ScrapePipeline::new(storage, config, fetcher, fallback);

    let engine = ScrapeEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Scrape completed successfully!");
            println!("✅ Scrape completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Scrape failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
