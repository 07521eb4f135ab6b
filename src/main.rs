use catalog_search::utils::{logger, validation::Validate};
use catalog_search::{CatalogError, CliConfig, HttpCatalogSource, SearchRunner};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting catalog-search CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ Search failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &CliConfig) -> Result<(), CatalogError> {
    let config = cli.resolve()?;
    config.validate()?;

    let source = HttpCatalogSource::new(&config)?;
    let mut runner = SearchRunner::new(source, config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner.run(&mut out).await?;

    Ok(())
}
