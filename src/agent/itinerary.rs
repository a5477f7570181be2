use tracing::debug;

use super::TravelAgent;
use crate::models::{ConversationState, Itinerary, Step, Turn};
use crate::prompts::ItineraryPrompt;
use crate::weather;

const UNKNOWN: &str = "Unknown";

impl TravelAgent {
    /// Draft an itinerary for the top-ranked destination.
    ///
    /// Follow-up turns keep the itinerary that already exists.
    pub async fn create_itinerary(&self, state: ConversationState) -> ConversationState {
        if state.is_followup && state.itinerary.is_some() {
            debug!("create_itinerary: keeping existing itinerary");
            return state;
        }

        let mut state = state;
        let top = state.destinations.first().map(|s| &s.destination);
        let name = top.map_or_else(|| UNKNOWN.to_string(), |d| d.name.clone());
        let country = top.map_or_else(|| UNKNOWN.to_string(), |d| d.country.clone());
        let selected = top
            .map(|d| serde_json::to_string_pretty(&[d]))
            .transpose()
            .unwrap_or_default()
            .unwrap_or_else(|| "[]".to_string());
        let duration = state
            .preferences
            .duration
            .unwrap_or(self.settings.default_duration_days);
        debug!(destination = %name, duration, "create_itinerary: called");

        let forecast = weather::get_forecast(&name);
        let prompt = self.prompts.create_itinerary(&ItineraryPrompt {
            user_preferences: state.preferences.to_pretty_json(),
            selected_destinations: selected,
            weather_forecast: forecast.to_pretty_json(),
            trip_duration: duration,
        });

        let plan = self
            .ask_or_fallback(Step::CreateItinerary, prompt, &mut state)
            .await;

        state.push_turn(Turn::system(format!("Created itinerary for {name}")));
        state.push_turn(Turn::assistant(format!(
            "Here's your {duration}-day itinerary for {name}, {country}:\n\n{plan}\n\n\
             Do you have any questions about this itinerary or would you like me to modify anything?"
        )));
        state.itinerary = Some(Itinerary {
            destination: name,
            country,
            duration,
            plan,
        });
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::test_support::agent_with;
    use crate::llm::mock::ScriptedGenerator;
    use crate::models::Preferences;
    use crate::scoring::rank_destinations;
    use std::sync::Arc;

    fn ranked_state(prefs: Preferences) -> ConversationState {
        let catalog = crate::catalog::DestinationCatalog::embedded();
        let mut state = ConversationState::new().with_user_message("plan it");
        state.destinations = rank_destinations(&prefs, catalog.destinations(), 5);
        state.preferences = prefs;
        state
    }

    #[tokio::test]
    async fn test_itinerary_for_top_destination() {
        let generator = Arc::new(ScriptedGenerator::new(vec!["Day 1: Temples"]));
        let agent = agent_with(generator.clone());
        let state = ranked_state(Preferences {
            interests: Some(vec!["shopping".to_string()]),
            duration: Some(6),
            ..Preferences::default()
        });

        let state = agent.create_itinerary(state).await;

        let itinerary = state.itinerary.clone().unwrap();
        assert_eq!(itinerary.destination, "Tokyo");
        assert_eq!(itinerary.country, "Japan");
        assert_eq!(itinerary.duration, 6);
        assert_eq!(itinerary.plan, "Day 1: Temples");

        let history = state.history();
        assert_eq!(
            history[history.len() - 2].content,
            "Created itinerary for Tokyo"
        );
        let reply = state.latest_assistant_reply().unwrap();
        assert!(reply.starts_with("Here's your 6-day itinerary for Tokyo, Japan:\n\nDay 1: Temples"));
        assert!(reply.ends_with("would you like me to modify anything?"));

        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("The trip lasts 6 days."));
        assert!(prompt.contains("Light Rain"));
    }

    #[tokio::test]
    async fn test_default_duration_and_placeholder() {
        let generator = Arc::new(ScriptedGenerator::new(vec!["Wander freely"]));
        let agent = agent_with(generator.clone());
        let state = ConversationState::new().with_user_message("anything");

        let state = agent.create_itinerary(state).await;

        let itinerary = state.itinerary.unwrap();
        assert_eq!(itinerary.destination, "Unknown");
        assert_eq!(itinerary.country, "Unknown");
        assert_eq!(itinerary.duration, 7);
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("\"temp_high\": 25"));
        assert!(prompt.contains("The trip lasts 7 days."));
    }

    #[tokio::test]
    async fn test_followup_keeps_existing_itinerary() {
        let generator = Arc::new(ScriptedGenerator::new(vec!["should not be used"]));
        let agent = agent_with(generator.clone());
        let mut state = ConversationState::new()
            .with_user_message("more please")
            .with_followup(true);
        state.itinerary = Some(Itinerary {
            destination: "Bali".to_string(),
            country: "Indonesia".to_string(),
            duration: 7,
            plan: "Beaches".to_string(),
        });
        let before = state.history().len();

        let state = agent.create_itinerary(state).await;

        assert_eq!(generator.call_count(), 0);
        assert_eq!(state.history().len(), before);
        assert_eq!(state.itinerary.unwrap().plan, "Beaches");
    }
}
