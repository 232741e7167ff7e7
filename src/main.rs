use anyhow::{Context, Result};
use clap::Parser;
use indexadmin::api::HttpAdminApi;
use indexadmin::config::Config;
use indexadmin::constants::WARN_NO_API_KEY;
use indexadmin::logger::Logger;
use indexadmin::ui::{self, core::AppContext};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal admin console for the indexing platform", long_about = None)]
struct Args {
    /// Path to a configuration file (default: ./indexadmin.toml, then the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a default configuration file to PATH and exit
    #[arg(long, value_name = "PATH")]
    generate_config: Option<PathBuf>,

    /// Override the API base URL from the configuration
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = args.generate_config {
        return Config::generate_default_config(path);
    }

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
        config.validate()?;
    }

    let logger = Logger::from_config(config.logging.enabled)?;
    let api = HttpAdminApi::from_config(&config.api).context("Failed to create API client")?;
    if !api.has_api_key() {
        eprintln!("{} (set {})", WARN_NO_API_KEY, config.api.api_key_env);
        logger.log(WARN_NO_API_KEY.to_string());
    }
    logger.log(format!("Using admin API at {}", api.base_url()));

    let ctx = AppContext::new(Arc::new(api), config, logger);
    ui::run_app(ctx).await
}
