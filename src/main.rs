//! Travel Planner CLI entry point

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use travelplanner::cli::{Cli, Command, rank_preferences};
use travelplanner::scoring::{self, rank_destinations};
use travelplanner::{
    AgentSettings, ChatSession, DestinationCatalog, PlannerError, Preferences, TravelAgent,
    TravelPlannerConfig, create_generator, logging, weather,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<PlannerError>() {
                Some(planner_error) => eprintln!("Error: {}", planner_error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = TravelPlannerConfig::load_from_path(cli.config)
        .context("Failed to load configuration")?;
    if let Some(path) = cli.destinations {
        config.data.destinations_path = Some(path);
    }

    logging::init(&config.logging, cli.verbose)?;
    info!(
        "Loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    let catalog = DestinationCatalog::load(config.data.destinations_path.as_deref());

    match cli.command {
        Some(Command::Rank {
            budget,
            duration,
            interests,
            season,
            top,
        }) => {
            let prefs = rank_preferences(budget, duration, interests, season);
            cmd_rank(&catalog, &prefs, top.unwrap_or(config.planner.top_k));
            Ok(())
        }
        Some(Command::Weather { destination }) => {
            cmd_weather(&destination);
            Ok(())
        }
        Some(Command::Chat { message }) => cmd_chat(&config, catalog, message).await,
        None => cmd_chat(&config, catalog, None).await,
    }
}

fn cmd_rank(catalog: &DestinationCatalog, prefs: &Preferences, top_k: usize) {
    if prefs.is_empty() {
        info!("No preferences given, destinations keep catalog order");
    }
    let ranked = rank_destinations(prefs, catalog.destinations(), top_k);
    if ranked.is_empty() {
        println!("No destinations available.");
        return;
    }

    for (i, scored) in ranked.iter().enumerate() {
        let dest = &scored.destination;
        let parts = scoring::explain(prefs, dest);
        println!(
            "{}. {}, {} - score {} (budget {}, duration {}, interests {}, season {})",
            i + 1,
            dest.name,
            dest.country,
            scored.match_score,
            parts.budget,
            parts.duration,
            parts.interests,
            parts.season
        );
    }
}

fn cmd_weather(destination: &str) {
    let forecast = weather::get_forecast(destination);
    println!("Forecast for {destination}:");
    for day in &forecast.forecast {
        println!(
            "  Day {}: {}, {}",
            day.day,
            day.condition,
            day.format_temperature()
        );
    }
}

async fn cmd_chat(
    config: &TravelPlannerConfig,
    catalog: DestinationCatalog,
    message: Option<String>,
) -> Result<()> {
    let generator = create_generator(&config.llm).map_err(PlannerError::from)?;
    let agent = TravelAgent::new(generator, catalog, AgentSettings::from(&config.planner))?;
    let mut session = ChatSession::new(agent, config.planner.exit_keyword.clone());

    match message {
        Some(message) => {
            let reply = session.respond(&message).await;
            println!("{reply}");
        }
        None => session.run_interactive().await?,
    }
    Ok(())
}
