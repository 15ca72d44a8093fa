use aero_catalog::core::sort;
use aero_catalog::utils::monitor::SystemMonitor;
use aero_catalog::utils::{logger, validation::Validate};
use aero_catalog::{
    CatalogCommand, CatalogService, CliConfig, FileCatalogSource, HttpCatalogSource,
    InMemoryAircraftStore, InMemoryCache, TomlConfig,
};
use aero_catalog::domain::model::Aircraft;
use aero_catalog::domain::ports::CatalogSource;
use aero_catalog::utils::error::Result;
use clap::Parser;
use std::time::Duration;

async fn load_records(location: &str) -> Result<Vec<Aircraft>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        HttpCatalogSource::new(location.to_string()).load().await
    } else {
        FileCatalogSource::new(location)?.load().await
    }
}

async fn run(config: &CliConfig) -> Result<()> {
    // The alias table is static data; fail fast if an edit broke it.
    sort::verify_alias_table()?;

    if matches!(config.command, CatalogCommand::Fields) {
        println!("{:<20} {}", "ALIAS", "FIELD");
        for (alias, field) in sort::alias_table() {
            println!("{:<20} {}", alias, field.canonical_path());
        }
        return Ok(());
    }

    let toml_config = match &config.config {
        Some(path) => {
            let parsed = TomlConfig::from_file(path)?;
            parsed.validate()?;
            Some(parsed)
        }
        None => None,
    };

    let location = config
        .dataset
        .clone()
        .or_else(|| toml_config.as_ref().map(|c| c.source.location.clone()))
        .unwrap_or_default();

    let monitor = SystemMonitor::new(config.monitor);

    let records = load_records(&location).await?;
    monitor.log_stats("Dataset loaded");

    let cache_ttl = toml_config
        .as_ref()
        .map(|c| c.cache_ttl_seconds())
        .unwrap_or(300);
    let store = InMemoryAircraftStore::new(records);
    let service =
        CatalogService::with_cache_ttl(store, InMemoryCache::new(), Duration::from_secs(cache_ttl));

    match &config.command {
        CatalogCommand::Search(args) => {
            let criteria = args.to_criteria();
            let page = service.search(&criteria).await?;
            monitor.log_stats("Search complete");
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        CatalogCommand::Compare(args) => {
            let request = args.to_request();
            let result = service.compare(&request).await?;
            monitor.log_stats("Comparison complete");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        CatalogCommand::Fields => unreachable!("handled above"),
    }

    service.metrics().log_summary();
    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting aero-catalog CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run(&config).await {
        Ok(()) => {
            tracing::info!("✅ Done");
        }
        Err(e) => {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                aero_catalog::utils::error::ErrorSeverity::Low => 2,
                aero_catalog::utils::error::ErrorSeverity::Medium => 3,
                aero_catalog::utils::error::ErrorSeverity::High => 1,
                aero_catalog::utils::error::ErrorSeverity::Critical => 4,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
