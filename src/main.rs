//! coursegen
//!
//! Client and admin CLI for the AI course generation backend.

mod admin;
mod api;
mod cli;
mod config;
mod errors;
mod generation;
mod models;
mod notify;
mod scope;
mod session;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::ApiClient;
use cli::{Args, Context};
use config::{Config, LogFormat};
use scope::ViewScope;
use session::SessionContext;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Load configuration
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(2);
        }
    };

    init_tracing(&config);

    tracing::debug!("API URL: {}", config.api_url);
    tracing::debug!("Session path: {:?}", config.session_path);

    if let Err(e) = run(args, config).await {
        tracing::error!("{}", e);
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<Config, errors::AppError> {
    let mut config = Config::from_env()?;
    if let Some(url) = &args.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(path) = &args.session {
        config.session_path = path.clone();
    }
    Ok(config)
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run(args: Args, config: Config) -> Result<(), errors::AppError> {
    let client = ApiClient::new(&config.api_url)?;
    let mut session = SessionContext::load(&config.session_path)?;

    // Ctrl-C tears the view down; in-flight calls resolve as cancelled.
    let scope = ViewScope::new("cli");
    let cancel = scope.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling in-flight request");
            cancel.cancel();
        }
    });

    let result = cli::run(
        args.command,
        Context {
            client: &client,
            session: &mut session,
            scope: &scope,
        },
    )
    .await;

    session.save(&config.session_path)?;
    result
}

#[cfg(test)]
mod tests;
