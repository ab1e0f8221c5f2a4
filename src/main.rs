use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use nutri_planner_rs::ai::GeminiClient;
use nutri_planner_rs::api::{create_router, AppState};
use nutri_planner_rs::cli::{Cli, Command, ProfileArgs};
use nutri_planner_rs::config::Config;
use nutri_planner_rs::error::{NutriError, Result};
use nutri_planner_rs::interface::{
    collect_profile, display_catalog, display_menu, display_targets, prompt_budget,
};
use nutri_planner_rs::observability::init_logging;
use nutri_planner_rs::planner::{nutrition_targets, optimize_menu};
use nutri_planner_rs::state::{default_catalog, load_catalog, MealCatalog};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.clone())?;
    config.validate()?;
    init_logging(&config.logging);

    let command = cli.command.unwrap_or_default();

    match command {
        Command::Serve { host, port } => runtime()?.block_on(cmd_serve(config, host, port)),
        Command::Targets(args) => cmd_targets(&args),
        Command::Catalog { file } => cmd_catalog(&config, file),
        Command::Menu { profile, budget } => cmd_menu(&config, &profile, budget),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

/// Load the catalog from `file`, else the configured path, else the built-in meals.
fn load_meals(config: &Config, file: Option<String>) -> Result<MealCatalog> {
    match file.or_else(|| config.catalog.path.clone()) {
        Some(path) => {
            let catalog = load_catalog(&path)?;
            info!(path = %path, meals = catalog.len(), "Loaded catalog");
            Ok(catalog)
        }
        None => Ok(default_catalog()),
    }
}

fn gemini_client(config: &Config) -> Result<GeminiClient> {
    let client = GeminiClient::new(
        config.ai.api_key.clone(),
        config.ai.base_url.clone(),
        Duration::from_secs(config.ai.timeout_secs),
    )?;
    if !client.has_credentials() {
        warn!("GEMINI_API_KEY is not set; AI requests will use fallbacks");
    }
    Ok(client)
}

/// Run the HTTP API until interrupted.
async fn cmd_serve(config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    let catalog = load_meals(&config, None)?;
    let generator = Arc::new(gemini_client(&config)?);
    let state = AppState::new(catalog, generator, config.ai.settings());
    let app = create_router().with_state(state);

    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| NutriError::Server(format!("failed to bind {}: {}", addr, e)))?;
    info!(%addr, "Nutri AI API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NutriError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}

/// Print targets for a profile.
fn cmd_targets(args: &ProfileArgs) -> Result<()> {
    let profile = collect_profile(args)?;
    let targets = nutrition_targets(&profile);
    display_targets(&profile, &targets);
    Ok(())
}

/// Print the catalog.
fn cmd_catalog(config: &Config, file: Option<String>) -> Result<()> {
    let catalog = load_meals(config, file)?;
    display_catalog(&catalog);
    Ok(())
}

/// Build and print a budget menu.
fn cmd_menu(config: &Config, args: &ProfileArgs, budget: Option<f64>) -> Result<()> {
    let profile = collect_profile(args)?;
    let budget = match budget {
        Some(b) if b.is_finite() && b > 0.0 => b,
        Some(_) => {
            return Err(NutriError::InvalidInput(
                "Budget must be greater than 0".to_string(),
            ));
        }
        None => prompt_budget()?,
    };

    let catalog = load_meals(config, None)?;
    let generator = gemini_client(config)?;
    let settings = config.ai.settings();

    let targets = nutrition_targets(&profile);
    display_targets(&profile, &targets);

    println!("Planning a menu for {:.0} VND...", budget);
    let menu = runtime()?.block_on(optimize_menu(
        &generator,
        &settings,
        &catalog,
        &profile,
        budget,
    ));
    display_menu(&menu);
    Ok(())
}
