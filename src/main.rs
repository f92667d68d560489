//! Chat Widget
//!
//! Entry point: serves the browser widget (default) or chats from the
//! terminal.

use std::sync::Arc;

use chat_widget::cli::run_terminal;
use chat_widget::config::{AppConfig, Command};
use chat_widget::{logging, server};
use dotenvy::dotenv;
use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let (config, command) = match AppConfig::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    logging::init(&config.logging)?;

    let config = Arc::new(config);
    match command {
        Command::Serve => server::start_server(config).await,
        Command::Chat => run_terminal(&config).await,
    }
}
