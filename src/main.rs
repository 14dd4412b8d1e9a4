use clap::Parser;
use contract_bench::utils::monitor::SystemMonitor;
use contract_bench::utils::{logger, validation::Validate};
use contract_bench::{CliConfig, LocalStorage, SearchEngine, SearchPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting contract-bench CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let monitor = SystemMonitor::new(config.monitor);

    let storage = LocalStorage::new();
    let pipeline = SearchPipeline::new(storage, config);
    let engine = SearchEngine::new(pipeline);

    match engine.run().await {
        Ok(outcome) => {
            match &outcome.report.summary {
                Some(summary) => {
                    println!("Fetched {} records", summary.frequency);
                    println!("Average contract value: {:.2}", summary.average_value);
                    println!("Top vendors:");
                    for (vendor, count) in &summary.top_vendors {
                        println!("  {}: {}", vendor, count);
                    }
                }
                None => println!("No records found"),
            }

            if let Some(path) = &outcome.output_path {
                println!("📁 Records saved to: {}", path);
            }

            monitor.log_summary();
        }
        Err(e) => {
            tracing::error!("❌ Search failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}
