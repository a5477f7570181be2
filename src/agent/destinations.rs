use tracing::debug;

use super::TravelAgent;
use crate::models::{ConversationState, Step, Turn};
use crate::prompts::DestinationPrompt;
use crate::scoring::rank_destinations;

impl TravelAgent {
    /// Rank the catalog against the preferences and ask the model to recommend from the shortlist
    pub async fn find_destinations(&self, state: ConversationState) -> ConversationState {
        let mut state = state;
        let ranked = rank_destinations(
            &state.preferences,
            self.catalog.destinations(),
            self.settings.top_k,
        );
        debug!(count = ranked.len(), "find_destinations: ranked catalog");

        let prompt = self.prompts.find_destinations(&DestinationPrompt {
            user_preferences: state.preferences.to_pretty_json(),
            available_destinations: serde_json::to_string_pretty(&ranked)
                .unwrap_or_else(|_| "[]".to_string()),
        });

        let names: Vec<String> = ranked
            .iter()
            .map(|s| s.destination.name.clone())
            .collect();
        state.destinations = ranked;

        let reply = self
            .ask_or_fallback(Step::FindDestinations, prompt, &mut state)
            .await;

        state.push_turn(Turn::system(format!("Selected destinations: {names:?}")));
        state.push_turn(Turn::assistant(reply));
        state
    }
}
