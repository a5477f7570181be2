//! Conversation turns and the state threaded through the workflow

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Itinerary, Preferences, ScoredDestination};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "user",
            Role::System => "system",
            Role::Assistant => "assistant",
        })
    }
}

/// One role-tagged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.content)
    }
}

/// The four workflow steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ExtractPreferences,
    FindDestinations,
    CreateItinerary,
    HandleFollowup,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::ExtractPreferences => "extract_preferences",
            Step::FindDestinations => "find_destinations",
            Step::CreateItinerary => "create_itinerary",
            Step::HandleFollowup => "handle_followup",
        })
    }
}

/// A step that completed with substitute output instead of failing the turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degradation {
    pub step: Step,
    pub reason: String,
}

/// Everything the workflow knows about one session.
///
/// Steps take the state by value and hand back the updated value. The
/// history can only grow: there is no API to remove or edit a turn.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    pub preferences: Preferences,
    pub destinations: Vec<ScoredDestination>,
    pub itinerary: Option<Itinerary>,
    pub is_followup: bool,
    history: Vec<Turn>,
    degradations: Vec<Degradation>,
}

impl ConversationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message, returning the updated state
    #[must_use]
    pub fn with_user_message(mut self, text: impl Into<String>) -> Self {
        self.push_turn(Turn::user(text));
        self
    }

    #[must_use]
    pub fn with_followup(mut self, is_followup: bool) -> Self {
        self.is_followup = is_followup;
        self
    }

    pub fn push_turn(&mut self, turn: Turn) {
        self.history.push(turn);
    }

    pub fn record_degradation(&mut self, degradation: Degradation) {
        self.degradations.push(degradation);
    }

    #[must_use]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    #[must_use]
    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    #[must_use]
    pub fn last_turn(&self) -> Option<&Turn> {
        self.history.last()
    }

    /// Content of the most recent user turn
    #[must_use]
    pub fn latest_user_message(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.as_str())
    }

    /// Content of the final turn if it came from the assistant
    #[must_use]
    pub fn latest_assistant_reply(&self) -> Option<&str> {
        self.last_turn()
            .filter(|t| t.role == Role::Assistant)
            .map(|t| t.content.as_str())
    }

    /// Every turn except the most recent user turn, as `role: content` lines
    #[must_use]
    pub fn transcript_without_latest_user(&self) -> String {
        let latest_user = self.history.iter().rposition(|t| t.role == Role::User);
        self.history
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != latest_user)
            .map(|(_, turn)| turn.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
