use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::TravelAgent;
use crate::models::{ConversationState, Degradation, Preferences, RejectedField, Step, Turn};
use crate::prompts::PreferencePrompt;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced JSON pattern is valid")
});

/// Outcome of reading the model's preference reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Parsed {
        preferences: Preferences,
        rejected: Vec<RejectedField>,
    },
    /// No usable JSON object in the reply
    Unparseable { raw: String, reason: String },
}

/// Pull the JSON object out of a model reply: the fenced ```json block when
/// there is one, otherwise the whole reply.
#[must_use]
pub fn parse_extraction(reply: &str) -> Extraction {
    let json_text = FENCED_JSON
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map_or(reply.trim(), |m| m.as_str());

    let unparseable = |reason: String| Extraction::Unparseable {
        raw: reply.to_string(),
        reason,
    };

    let value: Value = match serde_json::from_str(json_text) {
        Ok(value) => value,
        Err(e) => return unparseable(format!("invalid JSON: {e}")),
    };

    match Preferences::from_json(&value) {
        Ok((preferences, rejected)) => Extraction::Parsed {
            preferences,
            rejected,
        },
        Err(e) => unparseable(e.to_string()),
    }
}

/// The assistant's summary of what it understood so far
#[must_use]
pub fn acknowledgment(prefs: &Preferences) -> String {
    let duration = prefs
        .duration
        .map_or_else(|| "short".to_string(), |d| d.to_string());
    let mut text = format!("I understand you're looking for a {duration} day trip ");

    if let Some(budget) = prefs.budget {
        text.push_str(&format!("with a {budget} budget "));
    }

    match prefs.interests.as_deref() {
        Some([only]) => text.push_str(&format!("focused on {only}. ")),
        Some([init @ .., last]) => {
            text.push_str(&format!("focused on {} and {last}. ", init.join(", ")));
        }
        _ => text.push_str(". "),
    }

    text.push_str("Let me find some suitable destinations for you.");
    text
}

impl TravelAgent {
    /// Read preferences from the latest user message and merge them into the state
    pub async fn extract_preferences(&self, state: ConversationState) -> ConversationState {
        let mut state = state;
        let user_message = state.latest_user_message().unwrap_or_default().to_string();
        debug!(len = user_message.len(), "extract_preferences: called");

        let prompt = self.prompts.extract_preferences(&PreferencePrompt {
            user_message: &user_message,
        });

        match self.ask(Step::ExtractPreferences, prompt).await {
            Ok(reply) => match parse_extraction(&reply) {
                Extraction::Parsed {
                    preferences,
                    rejected,
                } => {
                    for field in &rejected {
                        warn!(field = %field.field, reason = %field.reason, "rejected preference value");
                    }
                    state.push_turn(Turn::system(format!(
                        "Extracted preferences: {}",
                        serde_json::to_string(&preferences).unwrap_or_default()
                    )));
                    if !rejected.is_empty() {
                        let fields: Vec<&str> = rejected.iter().map(|r| r.field.as_str()).collect();
                        state.push_turn(Turn::system(format!(
                            "Ignored invalid preference values: {}",
                            fields.join(", ")
                        )));
                    }
                    state.preferences = std::mem::take(&mut state.preferences).merge(preferences);
                }
                Extraction::Unparseable { reason, .. } => {
                    warn!(%reason, "could not parse preferences");
                    state.push_turn(Turn::system(format!(
                        "Could not parse preferences: {reason}"
                    )));
                    state.record_degradation(Degradation {
                        step: Step::ExtractPreferences,
                        reason,
                    });
                }
            },
            Err(degradation) => {
                state.push_turn(Turn::system(format!(
                    "Could not extract preferences: {}",
                    degradation.reason
                )));
                state.record_degradation(degradation);
            }
        }

        let ack = acknowledgment(&state.preferences);
        state.push_turn(Turn::assistant(ack));
        state
    }
}
