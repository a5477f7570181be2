//! Command-line definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{BudgetLevel, Preferences};

/// Travel Planner - conversational trip planning assistant
#[derive(Debug, Parser)]
#[command(
    name = "travelplanner",
    about = "Conversational travel planner that ranks destinations and drafts itineraries",
    version,
    after_help = "Set GOOGLE_API_KEY (gemini) or OPENAI_API_KEY (openai) before chatting. \
                  Logs go to stderr; use -v or RUST_LOG for more detail."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "TRAVELPLANNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file with destination records (overrides the config file)
    #[arg(long, global = true, value_name = "FILE")]
    pub destinations: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chat with the travel agent (the default)
    Chat {
        /// Send a single message and print the reply instead of starting a session
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Rank destinations offline for the given preferences
    Rank {
        /// Budget level (low, medium, high or a synonym such as "luxury")
        #[arg(short, long, value_parser = parse_budget)]
        budget: Option<BudgetLevel>,

        /// Trip length in days
        #[arg(short, long)]
        duration: Option<u32>,

        /// Interest to match against destination tags (repeatable)
        #[arg(short, long = "interest", value_name = "INTEREST")]
        interests: Vec<String>,

        /// Travel season, e.g. spring
        #[arg(short, long)]
        season: Option<String>,

        /// Number of destinations to show
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Show the fixture forecast for a destination
    Weather {
        /// Destination name
        destination: String,
    },
}

fn parse_budget(value: &str) -> Result<BudgetLevel, String> {
    BudgetLevel::parse(value).ok_or_else(|| {
        format!("unknown budget level '{value}' (expected low, medium or high)")
    })
}

/// Preferences assembled from `rank` arguments
#[must_use]
pub fn rank_preferences(
    budget: Option<BudgetLevel>,
    duration: Option<u32>,
    interests: Vec<String>,
    season: Option<String>,
) -> Preferences {
    Preferences {
        budget,
        duration,
        interests: (!interests.is_empty()).then_some(interests),
        season,
        ..Preferences::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rank_arguments() {
        let cli = Cli::try_parse_from([
            "travelplanner",
            "rank",
            "--budget",
            "luxury",
            "--interest",
            "food",
            "--interest",
            "culture",
            "--top",
            "3",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Rank {
                budget,
                interests,
                top,
                ..
            }) => {
                assert_eq!(budget, Some(BudgetLevel::High));
                assert_eq!(interests, vec!["food", "culture"]);
                assert_eq!(top, Some(3));
            }
            other => panic!("expected rank, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_budget() {
        assert!(Cli::try_parse_from(["travelplanner", "rank", "--budget", "lavish"]).is_err());
    }

    #[test]
    fn test_global_destinations_flag() {
        let cli = Cli::try_parse_from([
            "travelplanner",
            "weather",
            "Bali",
            "--destinations",
            "places.json",
        ])
        .unwrap();
        assert_eq!(cli.destinations, Some(PathBuf::from("places.json")));
    }

    #[test]
    fn test_rank_preferences_drops_empty_interests() {
        let prefs = rank_preferences(None, Some(4), Vec::new(), None);
        assert!(prefs.interests.is_none());
        assert_eq!(prefs.duration, Some(4));
    }
}
