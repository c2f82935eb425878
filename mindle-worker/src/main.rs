use anyhow::Context;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mindle_core::WordValidator;
use mindle_persistence::{SeaOrmStore, connection::connect_and_migrate};
use mindle_worker::{Services, clock::SystemClock, config::Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindle_worker=info,mindle_persistence=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mindle worker...");

    if let Err(e) = run().await {
        error!("Mindle worker stopped: {:#}", e);
        std::process::exit(1);
    }

    info!("Mindle worker shutdown complete.");
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    info!("Loading words from directory: {}", config.words_directory);
    let vocabulary = WordValidator::from_directory(&config.words_directory).with_context(|| {
        format!(
            "the worker needs word files; point WORDS_DIRECTORY at a directory of .txt word lists (currently '{}')",
            config.words_directory
        )
    })?;

    let db = connect_and_migrate(&config.database_url)
        .await
        .context("failed to connect to database and run migrations")?;
    let store = Arc::new(SeaOrmStore::new(db));
    let clock = Arc::new(SystemClock);

    let services = Services::new(store, Arc::new(vocabulary), &config, clock.clone())?;
    services.daily_words.ensure_daily_words().await?;
    let scheduler = services.scheduler(&config, clock)?;

    tokio::select! {
        _ = scheduler.run() => {}
        result = shutdown_signal() => result?,
    }

    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())?;
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await?;
        info!("Received Ctrl+C, shutting down gracefully...");
    }

    Ok(())
}
