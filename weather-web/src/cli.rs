use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::{net::TcpListener, signal};
use tracing::info;
use weather_core::{Config, LocationQuery, ViewState, WeatherService, provider_from_config};
use weather_web::{AppState, create_router, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Serve the weather page over HTTP.
    Serve {
        /// Listen address; overrides the config file and WEATHER_BIND.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show current weather for a location in the terminal.
    Show {
        /// City name; defaults to London.
        location: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Serve { bind } => serve(bind).await,
            Command::Show { location } => show(location).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load_file()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    cfg.set_api_key(api_key.trim().to_string());
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn serve(bind: Option<String>) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let service = WeatherService::new(provider_from_config(&cfg)?);
    let state = AppState::new(service).context("Failed to compile page template")?;

    let addr = bind.unwrap_or_else(|| cfg.bind.clone());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, upstream = %cfg.base_url, "Weather page listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn show(location: Option<String>) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let service = WeatherService::new(provider_from_config(&cfg)?);

    let query = LocationQuery::resolve(location.as_deref());
    println!("Searching {query}...");

    match service.lookup(Some(query.as_str())).await {
        ViewState::Ready { view, .. } => {
            print!("{}", render::text(&view));
            Ok(())
        }
        ViewState::Failed { error, .. } => Err(error).context("Weather lookup failed"),
        other => anyhow::bail!("Lookup ended in unexpected state: {other:?}"),
    }
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
