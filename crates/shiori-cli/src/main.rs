mod cli;
mod error;
mod logging;
mod views;

use std::process::ExitCode;

use chrono::{Local, Weekday};
use clap::Parser;
use url::Url;

use shiori_api::{AniZipClient, BackendClient};
use shiori_core::config::SiteConfig;
use shiori_core::escape::encode_component;
use shiori_core::models::{AudioType, StreamServers};
use shiori_web::{
    HomeFeed, MemoryDocument, SchedulePage, SuggestionController, SuggestionState, UpdateOutcome,
    WatchConfig, WatchController,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::views::{print_document, DropdownBuffer, PlayerSummary};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.log_file.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = SiteConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    tracing::debug!(base_url = %config.api.base_url, "Using backend");

    let api = BackendClient::new(&config.api.base_url)?
        .with_suggestions_path(config.api.suggestions_path.clone());

    match cli.command {
        Command::Home => home(api, &config).await,
        Command::Schedule { day } => schedule(api, &config, day).await,
        Command::Suggest { query } => suggest(api, &config, &query).await,
        Command::Watch {
            anime_id,
            ep,
            server,
            dub,
        } => watch(api, &config, anime_id, ep, server, dub).await,
    }
}

async fn home(api: BackendClient, config: &SiteConfig) -> Result<(), CliError> {
    let artwork = AniZipClient::with_base_url(&config.api.artwork_url)?;
    let feed = HomeFeed::new(api, artwork, MemoryDocument::home(), config.home.clone());
    let slides = feed.load().await;
    tracing::info!(slides, "Home page rendered");
    print_document(&feed.into_document());
    Ok(())
}

async fn schedule(
    api: BackendClient,
    config: &SiteConfig,
    day: Option<Weekday>,
) -> Result<(), CliError> {
    let page = SchedulePage::new(
        api,
        MemoryDocument::schedule(),
        Local,
        config.home.recently_aired_limit,
    );
    let now = Local::now();
    page.open(now).await;
    if let Some(day) = day {
        page.select_day(day, &now);
    }
    print_document(&page.into_document());
    Ok(())
}

async fn suggest(api: BackendClient, config: &SiteConfig, query: &str) -> Result<(), CliError> {
    let controller = SuggestionController::new(api, DropdownBuffer::default(), config.search.clone());
    controller.on_input(query).await;

    match controller.state() {
        SuggestionState::Rendered { results, .. } => {
            tracing::info!(count = results.len(), "Suggestions rendered");
            controller.with_view(|v| println!("{}", v.html.as_deref().unwrap_or_default().trim()));
        }
        SuggestionState::Idle => {
            println!(
                "Query must be at least {} characters.",
                config.search.min_query_len
            );
        }
        _ => println!("No suggestions."),
    }
    Ok(())
}

async fn watch(
    api: BackendClient,
    config: &SiteConfig,
    anime_id: String,
    episode: String,
    server: Option<String>,
    dub: bool,
) -> Result<(), CliError> {
    let page_url = Url::parse(&config.api.base_url)?
        .join(&format!("/watch/{}", encode_component(&anime_id)))?;
    let watch_config = WatchConfig {
        title: anime_id.clone(),
        anime_id,
        episode,
        server,
        audio: dub.then_some(AudioType::Dub),
        stream_servers: StreamServers::default(),
        page_url,
    };
    let mut controller =
        WatchController::new(api, PlayerSummary::default(), watch_config, &config.player);

    match controller.reload().await {
        UpdateOutcome::Failed => {
            let session = controller.session();
            Err(CliError::StreamUnavailable {
                episode: session.episode.clone(),
                server: session.server.clone(),
            })
        }
        _ => {
            controller.view().print();
            Ok(())
        }
    }
}
