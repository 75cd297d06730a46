use clap::Parser;
use store_finder::domain::ports::MapViewer;
use store_finder::utils::{logger, validation::Validate};
use store_finder::{
    CliConfig, Dataset, FinderError, LocalStorage, NoBrowser, Shell, StoreFinder, SystemBrowser,
};

fn fail(context: &str, e: &FinderError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("🚀 Starting store-finder");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli
        .load()
        .unwrap_or_else(|e| fail("Failed to load configuration", &e));

    // 驗證配置
    if let Err(e) = config.validate() {
        fail("Configuration validation failed", &e);
    }

    let dataset = Dataset::from_path(&config.dataset.path)
        .unwrap_or_else(|e| fail("Failed to load dataset", &e));
    let zips = config
        .build_zip_directory()
        .unwrap_or_else(|e| fail("Failed to set up zip directory", &e));
    let storage = LocalStorage::current_dir()?;
    let viewer: Box<dyn MapViewer> = if config.map.open_browser {
        Box::new(SystemBrowser)
    } else {
        Box::new(NoBrowser)
    };

    let finder = StoreFinder::new(dataset, zips, storage, viewer, config.finder_settings());

    let stdin = std::io::stdin();
    let mut shell = Shell::new(&finder, stdin.lock(), std::io::stdout());
    if let Err(e) = shell.run().await {
        fail("Console error", &e);
    }

    tracing::info!("👋 store-finder finished");
    Ok(())
}
