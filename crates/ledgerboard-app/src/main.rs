//! Main entry point for Ledgerboard.

use anyhow::Context;
use ledgerboard_app::{write_output, Dashboard};
use ledgerboard_common::{bootstrap_subscriber, init_logging};
use ledgerboard_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = tracing::subscriber::with_default(bootstrap_subscriber(), ConfigLoader::load)
        .context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialise logging")?;

    info!("Starting Ledgerboard");

    let dashboard = Dashboard::from_config(&config)
        .await
        .context("failed to assemble dashboard")?;

    let document = match dashboard.render().await {
        Ok(document) => document,
        Err(e) => {
            error!("Dashboard render failed: {}", e);
            return Err(e.into());
        }
    };

    write_output(config.output.path.as_deref(), &document)
        .await
        .context("failed to write dashboard document")?;

    Ok(())
}
