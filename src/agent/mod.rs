//! Travel planning agent
//!
//! Four steps share one [`TravelAgent`]:
//! - `extract_preferences`: turn the traveller's message into typed preferences
//! - `find_destinations`: score the catalog and ask the model for recommendations
//! - `create_itinerary`: draft a plan for the top destination
//! - `handle_followup`: answer questions about the existing plan
//!
//! Each step takes the [`ConversationState`] by value and returns the updated
//! state. A failed model call never aborts the turn: the step appends a
//! fallback reply and records a [`Degradation`] instead.

mod destinations;
mod extract;
mod followup;
mod itinerary;
mod workflow;

use std::sync::Arc;

use tracing::warn;

pub use extract::{Extraction, acknowledgment, parse_extraction};
pub use workflow::{ENTRY_STEP, Route, WorkflowRun, next_route, route_after_followup, route_after_itinerary};

use crate::PlannerError;
use crate::catalog::DestinationCatalog;
use crate::config::PlannerConfig;
use crate::llm::TextGenerator;
use crate::models::{ConversationState, Degradation, Step};
use crate::prompts::PromptLibrary;
use crate::scoring::DEFAULT_TOP_K;

/// Reply appended when the planning service cannot produce text
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't reach the travel planning service just now. Please try again in a moment.";

/// Tunables for the workflow steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSettings {
    pub top_k: usize,
    pub default_duration_days: u32,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            default_duration_days: 7,
        }
    }
}

impl From<&PlannerConfig> for AgentSettings {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            top_k: config.top_k,
            default_duration_days: config.default_duration_days,
        }
    }
}

pub struct TravelAgent {
    generator: Arc<dyn TextGenerator>,
    prompts: PromptLibrary,
    catalog: DestinationCatalog,
    settings: AgentSettings,
}

impl TravelAgent {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        catalog: DestinationCatalog,
        settings: AgentSettings,
    ) -> Result<Self, PlannerError> {
        Ok(Self {
            generator,
            prompts: PromptLibrary::new()?,
            catalog,
            settings,
        })
    }

    /// Send a rendered prompt to the model.
    ///
    /// Both template and service failures come back as a [`Degradation`] for
    /// the calling step to record.
    async fn ask(
        &self,
        step: Step,
        prompt: Result<String, PlannerError>,
    ) -> Result<String, Degradation> {
        let degrade = |reason: String| {
            warn!(%step, %reason, "step degraded");
            Degradation { step, reason }
        };

        let prompt = prompt.map_err(|e| degrade(e.to_string()))?;
        self.generator
            .generate(&prompt)
            .await
            .map_err(|e| degrade(e.to_string()))
    }

    /// Model text, or the fallback reply with the degradation recorded on `state`
    async fn ask_or_fallback(
        &self,
        step: Step,
        prompt: Result<String, PlannerError>,
        state: &mut ConversationState,
    ) -> String {
        match self.ask(step, prompt).await {
            Ok(text) => text,
            Err(degradation) => {
                state.record_degradation(degradation);
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
