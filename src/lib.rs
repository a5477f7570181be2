//! `TravelPlanner` - conversational travel planning
//!
//! This library turns a traveller's free-text messages into typed
//! preferences, ranks a destination catalog against them and drafts an
//! itinerary with a text generation service.

pub mod agent;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod models;
pub mod prompts;
pub mod scoring;
pub mod session;
pub mod weather;

// Re-export core types for public API
pub use agent::{AgentSettings, TravelAgent, WorkflowRun};
pub use catalog::{CatalogSource, DestinationCatalog};
pub use config::TravelPlannerConfig;
pub use error::PlannerError;
pub use llm::{LlmError, TextGenerator, create_generator};
pub use models::{ConversationState, Destination, Preferences, ScoredDestination};
pub use scoring::rank_destinations;
pub use session::ChatSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
