use tracing::debug;

use super::TravelAgent;
use crate::models::{ConversationState, Itinerary, Step, Turn};
use crate::prompts::FollowupPrompt;

impl TravelAgent {
    /// Answer the traveller's latest message in the context of the current plan.
    ///
    /// Earlier steps of the same turn may already have replied, so the
    /// question is the latest user turn rather than the last turn.
    pub async fn handle_followup(&self, state: ConversationState) -> ConversationState {
        let mut state = state;
        let question = state.latest_user_message().unwrap_or_default().to_string();
        debug!(len = question.len(), "handle_followup: called");

        let prompt = self.prompts.handle_followup(&FollowupPrompt {
            user_preferences: state.preferences.to_pretty_json(),
            current_itinerary: state
                .itinerary
                .as_ref()
                .map_or_else(|| "{}".to_string(), Itinerary::to_pretty_json),
            conversation_history: state.transcript_without_latest_user(),
            user_question: &question,
        });

        let reply = self
            .ask_or_fallback(Step::HandleFollowup, prompt, &mut state)
            .await;
        state.push_turn(Turn::assistant(reply));
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::FALLBACK_REPLY;
    use crate::agent::test_support::{agent_with, question_section};
    use crate::llm::mock::ScriptedGenerator;
    use crate::models::Role;
    use std::sync::Arc;

    fn planned_state() -> ConversationState {
        let mut state = ConversationState::new().with_user_message("A week in Bali");
        state.push_turn(Turn::assistant("Here's your 7-day itinerary for Bali"));
        state.itinerary = Some(Itinerary {
            destination: "Bali".to_string(),
            country: "Indonesia".to_string(),
            duration: 7,
            plan: "Day 1: Ubud".to_string(),
        });
        state
            .with_user_message("What if it rains on day 5?")
            .with_followup(true)
    }

    #[tokio::test]
    async fn test_followup_answers_with_context() {
        let generator = Arc::new(ScriptedGenerator::new(vec!["Visit the Ubud museums."]));
        let agent = agent_with(generator.clone());

        let state = agent.handle_followup(planned_state()).await;

        assert_eq!(state.latest_assistant_reply(), Some("Visit the Ubud museums."));
        assert_eq!(state.history().len(), 4);

        let prompt = &generator.prompts()[0];
        assert_eq!(question_section(prompt), Some("What if it rains on day 5?"));
        assert!(prompt.contains("user: A week in Bali\nassistant: Here's your 7-day itinerary for Bali"));
        assert!(prompt.contains("\"plan\": \"Day 1: Ubud\""));
    }

    #[tokio::test]
    async fn test_question_is_latest_user_turn_not_earlier_reply() {
        let generator = Arc::new(ScriptedGenerator::new(vec!["Try the night markets."]));
        let agent = agent_with(generator.clone());
        let mut state = planned_state().with_user_message("Where should we eat?");
        state.push_turn(Turn::system("Selected destinations: [\"Bali\"]"));
        state.push_turn(Turn::assistant("Bali still fits."));

        let state = agent.handle_followup(state).await;

        let prompt = &generator.prompts()[0];
        assert_eq!(question_section(prompt), Some("Where should we eat?"));
        assert!(prompt.contains("assistant: Bali still fits."));
        assert!(!prompt.contains("user: Where should we eat?"));
        assert_eq!(state.latest_assistant_reply(), Some("Try the night markets."));
    }

    #[tokio::test]
    async fn test_followup_without_itinerary() {
        let generator = Arc::new(ScriptedGenerator::new(vec!["Let's plan one first."]));
        let agent = agent_with(generator.clone());
        let state = ConversationState::new()
            .with_user_message("Can I swap day 2?")
            .with_followup(true);

        let state = agent.handle_followup(state).await;

        assert_eq!(state.last_turn().map(|t| t.role), Some(Role::Assistant));
        assert!(generator.prompts()[0].contains("Can I swap day 2?"));
    }

    #[tokio::test]
    async fn test_followup_failure_uses_fallback() {
        let generator = Arc::new(ScriptedGenerator::with_results(vec![Err(
            "quota exceeded".to_string(),
        )]));
        let agent = agent_with(generator);

        let state = agent.handle_followup(planned_state()).await;

        assert_eq!(state.latest_assistant_reply(), Some(FALLBACK_REPLY));
        assert_eq!(state.degradations().len(), 1);
        assert_eq!(state.degradations()[0].step, Step::HandleFollowup);
        assert!(state.degradations()[0].reason.contains("quota exceeded"));
        assert_eq!(state.itinerary.map(|i| i.destination).as_deref(), Some("Bali"));
    }
}
