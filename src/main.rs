use clap::Parser;
use homework_notifier::utils::{logger, validation::Validate};
use homework_notifier::{NotifierConfig, PracticumClient, Poller, TelegramNotifier};

#[tokio::main]
async fn main() {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    let config = NotifierConfig::parse();
    logger::init_logger(config.verbose, config.log_format);

    tracing::info!("Starting homework-notifier");
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}. Shutting down.", e);
        std::process::exit(e.exit_code());
    }

    let (source, notifier) = match (
        PracticumClient::from_config(&config),
        TelegramNotifier::from_config(&config),
    ) {
        (Ok(source), Ok(notifier)) => (source, notifier),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("❌ Failed to set up HTTP clients: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let mut poller = Poller::from_config(source, notifier, &config, config.start_timestamp());

    if let Err(e) = poller.run(config.max_iterations).await {
        tracing::error!(
            "❌ Polling stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Polling finished");
}
