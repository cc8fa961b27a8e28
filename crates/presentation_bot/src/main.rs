//! WeatherBot
//!
//! Main entry point for the Telegram bot.

#![allow(clippy::print_stdout)]

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use application::ports::{MessengerPort, Reply};
use clap::Parser;
use infrastructure::{AppConfig, TelegramMessenger, init_logging};
use presentation_bot::{
    Cli, Commands, PollSettings, UpdatePoller, build_dispatcher, build_weather_service,
    log_filter_from_verbosity, shutdown_signal,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))
        .context("Failed to initialize logging")?;

    info!("WeatherBot v{} starting", env!("CARGO_PKG_VERSION"));
    info!(config = %config, "Configuration loaded");

    match cli.command() {
        Commands::Run => run_bot(config).await.map(|()| ExitCode::SUCCESS),
        Commands::Weather { location, output } => weather_once(&config, &location, &output).await,
    }
}

/// Connect to Telegram and serve updates until a shutdown signal
async fn run_bot(config: AppConfig) -> anyhow::Result<()> {
    let warnings = config.validate();
    for warning in &warnings {
        warn!(%warning, "Configuration problem");
    }
    if let Some(fatal) = warnings.iter().find(|w| w.is_fatal_for_bot()) {
        anyhow::bail!("Cannot start the bot: {fatal}");
    }

    let client_config = config
        .telegram
        .to_client_config()
        .context("telegram.bot_token is required")?;
    let messenger = TelegramMessenger::new(client_config)?;

    let me = messenger
        .identify()
        .await
        .context("Failed to connect to Telegram")?;
    if let Err(e) = messenger.register_commands().await {
        warn!(error = %e, "Failed to register the command menu");
    }

    let client = messenger.client().clone();
    let messenger: Arc<dyn MessengerPort> = Arc::new(messenger);
    let dispatcher = build_dispatcher(&config, messenger, me.username.as_deref())?;

    let poller = UpdatePoller::new(
        client,
        Arc::new(dispatcher),
        PollSettings::from(&config.telegram),
    );
    poller.run(shutdown_signal()).await;

    info!("WeatherBot stopped");
    Ok(())
}

/// Run the `/weather` pipeline once and write the chart to `output`
async fn weather_once(
    config: &AppConfig,
    location: &[String],
    output: &Path,
) -> anyhow::Result<ExitCode> {
    for warning in config.validate() {
        warn!(%warning, "Configuration problem");
    }

    let service = build_weather_service(config)?.with_summary_caption(true);
    match service.handle_weather_command(location).await {
        Reply::Photo { image, caption } => {
            image
                .save(output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("{caption}");
            println!("Chart written to {}", output.display());
            Ok(ExitCode::SUCCESS)
        },
        Reply::Text(text) => {
            println!("{text}");
            Ok(ExitCode::FAILURE)
        },
    }
}
