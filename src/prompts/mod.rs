//! Prompt formatting
//!
//! Renders the embedded templates from small serializable contexts. All
//! rendering is pure: the same context always yields the same prompt.

mod embedded;

use handlebars::Handlebars;
use serde::Serialize;

use crate::PlannerError;

const EXTRACT_PREFERENCES: &str = "extract-preferences";
const FIND_DESTINATIONS: &str = "find-destinations";
const CREATE_ITINERARY: &str = "create-itinerary";
const HANDLE_FOLLOWUP: &str = "handle-followup";

#[derive(Debug, Clone, Serialize)]
pub struct PreferencePrompt<'a> {
    pub user_message: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DestinationPrompt {
    pub user_preferences: String,
    pub available_destinations: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItineraryPrompt {
    pub user_preferences: String,
    pub selected_destinations: String,
    pub weather_forecast: String,
    pub trip_duration: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowupPrompt<'a> {
    pub user_preferences: String,
    pub current_itinerary: String,
    pub conversation_history: String,
    pub user_question: &'a str,
}

/// The four step templates, registered once
pub struct PromptLibrary {
    hbs: Handlebars<'static>,
}

impl PromptLibrary {
    pub fn new() -> Result<Self, PlannerError> {
        let mut hbs = Handlebars::new();
        // Prompts are plain text; HTML escaping would mangle JSON and quotes
        hbs.register_escape_fn(handlebars::no_escape);

        for (name, template) in [
            (EXTRACT_PREFERENCES, embedded::EXTRACT_PREFERENCES),
            (FIND_DESTINATIONS, embedded::FIND_DESTINATIONS),
            (CREATE_ITINERARY, embedded::CREATE_ITINERARY),
            (HANDLE_FOLLOWUP, embedded::HANDLE_FOLLOWUP),
        ] {
            hbs.register_template_string(name, template)
                .map_err(|e| PlannerError::template(format!("{name}: {e}")))?;
        }

        Ok(Self { hbs })
    }

    pub fn extract_preferences(&self, ctx: &PreferencePrompt<'_>) -> Result<String, PlannerError> {
        self.render(EXTRACT_PREFERENCES, ctx)
    }

    pub fn find_destinations(&self, ctx: &DestinationPrompt) -> Result<String, PlannerError> {
        self.render(FIND_DESTINATIONS, ctx)
    }

    pub fn create_itinerary(&self, ctx: &ItineraryPrompt) -> Result<String, PlannerError> {
        self.render(CREATE_ITINERARY, ctx)
    }

    pub fn handle_followup(&self, ctx: &FollowupPrompt<'_>) -> Result<String, PlannerError> {
        self.render(HANDLE_FOLLOWUP, ctx)
    }

    fn render<T: Serialize>(&self, name: &str, ctx: &T) -> Result<String, PlannerError> {
        self.hbs
            .render(name, ctx)
            .map_err(|e| PlannerError::template(format!("{name}: {e}")))
    }
}
