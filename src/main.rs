use clap::Parser;
use card_value::cli::{Cli, Commands};
use card_value::config::Config;
use card_value::pricing::PriceSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::parse(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    card_value::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Estimate(args) => {
            tracing::debug!(card = %args.card.display(), "Running estimate");
            args.execute(&config).await?;
        }
        Commands::Revalue(args) => {
            tracing::debug!(card = %args.card.display(), "Running revaluation");
            args.execute(&config).await?;
        }
        Commands::Validate(args) => {
            tracing::info!(cases = %args.cases.display(), "Running accuracy validation");
            args.execute(&config).await?;
        }
        Commands::Sources => {
            println!("Price sources:");
            for source in PriceSource::ALL {
                println!("  {:<10} weight {}", source.as_str(), source.weight());
            }
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Engine: mock price ${} - ${}",
                config.engine.mock_price_min, config.engine.mock_price_max
            );
            println!(
                "  Confidence: fresh {}d, stale {}d",
                config.confidence.fresh_days, config.confidence.stale_days
            );
            println!(
                "  eBay: app_id={}, sandbox={}, max_results={}",
                if config.ebay.app_id.is_some() { "set" } else { "unset" },
                config.ebay.sandbox,
                config.ebay.max_results
            );
            println!(
                "  Telemetry: level={}, format={:?}",
                config.telemetry.log_level, config.telemetry.log_format
            );
        }
    }

    Ok(())
}
