//! Standalone server example
//!
//! Runs the model downloader routes without a host application, serving the
//! `models` directory under the current working directory.
//!
//! After starting, you can:
//! - View Swagger UI at http://127.0.0.1:8188/swagger-ui
//! - List folders via GET http://127.0.0.1:8188/simple-model-downloader/directories
//! - Download via POST http://127.0.0.1:8188/simple-model-downloader/download
//! - Stream events via GET http://127.0.0.1:8188/events
//!
//! Set `MODELS_DIR` to serve another directory and `RUST_LOG` to adjust
//! logging (`RUST_LOG=model_dl::wget=debug` shows raw wget output).

use model_dl::api::start_api_server;
use model_dl::{Config, EventBus, ModelDownloader};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::default();
    if let Some(dir) = std::env::var_os("MODELS_DIR") {
        config.models.models_dir = dir.into();
    }
    std::fs::create_dir_all(config.models_dir())?;

    let bus = EventBus::new();
    let downloader = Arc::new(ModelDownloader::new(config, Arc::new(bus.clone()))?);
    let config = downloader.get_config();

    let base = format!("http://{}", config.api.bind_address);
    let prefix = &config.api.route_prefix;
    println!("Model downloader listening on {base}");
    println!("  Swagger UI:    {base}/swagger-ui");
    println!("  Events stream: {base}/events");
    println!();
    println!("Example commands:");
    println!("  curl {base}{prefix}/directories");
    println!("  curl -X POST {base}{prefix}/download \\");
    println!("    -H 'Content-Type: application/json' \\");
    println!(
        "    -d '{{\"url\": \"https://example.com/detail.safetensors\", \"model_name\": \"detail\", \"save_path\": \"loras\"}}'"
    );
    println!("  curl -N {base}/events");

    // Runs until SIGINT or SIGTERM
    start_api_server(downloader, bus).await?;

    Ok(())
}
