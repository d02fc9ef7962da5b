//! Cashview report
//!
//! Opens the configured GnuCash book and prints every account with its safe
//! balance.

mod report;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cashview_db::{BookRepository, connect};
use cashview_shared::AppConfig;
use cashview_shared::config::LoggingConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate()?;

    init_tracing(&config.logging);

    let pool = connect(&config.book.path, config.book.read_only)
        .await
        .with_context(|| format!("Failed to open book {}", config.book.path.display()))?;
    info!(path = %config.book.path.display(), "Opened book");

    let book = BookRepository::new(pool).load().await?;
    let rows = report::report_rows(&book);

    if config.report.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", report::render_text(&rows));
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
