//! Step sequencing for one turn

use tracing::{debug, info};

use super::TravelAgent;
use crate::models::{ConversationState, Step};

/// Every turn starts by reading the latest message
pub const ENTRY_STEP: Step = Step::ExtractPreferences;

/// Where the workflow goes after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Next(Step),
    End,
}

/// Follow-up turns go on to answer the question; first turns stop at the plan
#[must_use]
pub fn route_after_itinerary(state: &ConversationState) -> Route {
    if state.is_followup {
        Route::Next(Step::HandleFollowup)
    } else {
        Route::End
    }
}

#[must_use]
pub fn route_after_followup(_state: &ConversationState) -> Route {
    Route::End
}

/// Edge out of `step` for the given state
#[must_use]
pub fn next_route(step: Step, state: &ConversationState) -> Route {
    match step {
        Step::ExtractPreferences => Route::Next(Step::FindDestinations),
        Step::FindDestinations => Route::Next(Step::CreateItinerary),
        Step::CreateItinerary => route_after_itinerary(state),
        Step::HandleFollowup => route_after_followup(state),
    }
}

/// Final state of one invocation plus the steps that ran, in order
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    pub state: ConversationState,
    pub steps: Vec<Step>,
}

impl TravelAgent {
    /// Run the workflow from the entry step until a route ends it
    pub async fn run(&self, state: ConversationState) -> WorkflowRun {
        let mut state = state;
        let mut steps = Vec::new();
        let mut route = Route::Next(ENTRY_STEP);

        while let Route::Next(step) = route {
            debug!(%step, "running step");
            state = match step {
                Step::ExtractPreferences => self.extract_preferences(state).await,
                Step::FindDestinations => self.find_destinations(state).await,
                Step::CreateItinerary => self.create_itinerary(state).await,
                Step::HandleFollowup => self.handle_followup(state).await,
            };
            steps.push(step);
            route = next_route(step, &state);
        }

        info!(
            steps = steps.len(),
            degraded = state.degradations().len(),
            "workflow finished"
        );
        WorkflowRun { state, steps }
    }

    /// Run the workflow and keep only the resulting state
    pub async fn invoke(&self, state: ConversationState) -> ConversationState {
        self.run(state).await.state
    }
}
