mod config;
mod csv;
mod db;
mod entities;
mod error;
mod files;
mod models;
mod seed;
mod slug;
mod store;
mod users;

use crate::{config::Config, store::Store};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,wallywood_seed=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    let store = Store::connect(&config.database_url).await?;

    let result = seed::run(&store, &config).await;

    if let Err(err) = store.close().await {
        tracing::warn!(error = %err, "failed to close database connection");
    }

    match result {
        Ok(report) => {
            tracing::info!(
                skipped_rows = report.skipped_rows.len(),
                skipped_files = report.skipped_files.len(),
                "seed finished"
            );
            Ok(())
        },
        Err(err) => {
            tracing::error!(error = %err, "seed failed");
            Err(err.into())
        },
    }
}
