//! Kamigotchi gallery client binary.
//!
//! Composition root: reads configuration from the environment (and `.env`),
//! lets command-line flags override it, builds the runtime and hands it to the
//! selected frontend.
//!
//! ```bash
//! cargo run -p kami-client -- --data-dir ./data --query "body=red&sort=rarity"
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "kami-gallery", about = "Browse the Kamigotchi collection")]
struct Args {
    /// Directory holding the collection JSON files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Gallery TOML config (defaults to `<data-dir>/gallery.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial view state as a query string, e.g. `body=red&sort=rarity`.
    #[arg(long)]
    query: Option<String>,

    /// Path component used for shareable locations.
    #[arg(long)]
    path: Option<String>,

    /// Items revealed per page.
    #[arg(long)]
    page_size: Option<usize>,

    /// Log directory override.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli(args).await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        let _ = args;
        compile_error!("At least one frontend feature must be enabled (frontend-cli)");
    }

    Ok(())
}

#[cfg(feature = "frontend-cli")]
async fn run_cli(args: Args) -> Result<()> {
    use client_bootstrap::{ClientConfig, RuntimeBuilder};
    use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
    use kami_client::Client;

    // 1. Load configuration from environment, then apply flags
    let mut client_config = ClientConfig::from_env();
    if let Some(data_dir) = args.data_dir {
        client_config.data_dir = data_dir;
    }
    if let Some(config) = args.config {
        client_config.config_path = Some(config);
    }
    if let Some(query) = args.query {
        client_config.initial_query = Some(query);
    }
    if let Some(path) = args.path {
        client_config.path = path;
    }
    if let Some(page_size) = args.page_size {
        client_config.page_size = Some(page_size);
    }
    if let Some(log_dir) = args.log_dir {
        client_config.log_dir = Some(log_dir);
    }
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();

    // 2. Setup logging; the guard flushes the log file on drop
    let _log_guard = logging::setup_logging(
        client_config.session_id.as_deref(),
        client_config.log_dir.as_deref(),
    )?;

    tracing::info!("Starting Kamigotchi gallery");
    tracing::info!("Data directory: {}", client_config.data_dir.display());

    // 3. Build Runtime
    let setup = RuntimeBuilder::new(client_config).build().await?;
    tracing::info!(
        page_size = setup.gallery.view.page_size,
        default_sort = %setup.gallery.view.default_sort,
        "Runtime built successfully"
    );

    // 4. Build Frontend and Client
    let frontend = CliFrontend::new(frontend_config, cli_config);
    let client = Client::builder()
        .runtime(setup.runtime)
        .frontend(frontend)
        .build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
