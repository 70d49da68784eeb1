use anyhow::Context;
use clap::Parser;
use echo_ingest::interfaces::http::run_server;
use echo_ingest::utils::{logger, validation::Validate};
use echo_ingest::ServerConfig;
use std::path::Path;

#[derive(Parser)]
#[command(name = "lead-server")]
#[command(about = "HTTP endpoints for the request-access form and prospect parsing")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "lead-server.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the listen port from config
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 設定檔不存在時使用預設值
    let mut config = if Path::new(&args.config).exists() {
        ServerConfig::from_file(&args.config)
            .with_context(|| format!("Failed to load config file '{}'", args.config))?
    } else {
        ServerConfig::default()
    };

    if let Some(port) = args.port {
        config.server.port = port;
    }

    logger::init_server_logger(args.verbose, config.logging.json);
    tracing::info!("🚀 Starting lead server (config: {})", args.config);

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.recovery_suggestion()))?;

    run_server(config).await.context("Lead server stopped with an error")?;
    Ok(())
}
