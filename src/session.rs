//! Console chat session

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::PlannerError;
use crate::agent::TravelAgent;
use crate::models::{ConversationState, eq_ignore_case};

/// Printed when a turn ends without an assistant message
pub const PROCESSING_REPLY: &str = "I'm processing your request...";

const FIRST_PROMPT: &str = "You: ";

/// One traveller's conversation with the agent
pub struct ChatSession {
    agent: TravelAgent,
    state: ConversationState,
    exit_keyword: String,
}

impl ChatSession {
    pub fn new(agent: TravelAgent, exit_keyword: impl Into<String>) -> Self {
        Self {
            agent,
            state: ConversationState::new(),
            exit_keyword: exit_keyword.into(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    #[must_use]
    pub fn is_exit(&self, input: &str) -> bool {
        eq_ignore_case(input, &self.exit_keyword)
    }

    /// Run one user message through the workflow and return the text to show
    pub async fn respond(&mut self, input: &str) -> String {
        let state = std::mem::take(&mut self.state).with_user_message(input);
        let mut state = self.agent.invoke(state).await;

        let reply = state
            .latest_assistant_reply()
            .unwrap_or(PROCESSING_REPLY)
            .to_string();

        state.is_followup = true;
        self.state = state;
        debug!(turns = self.state.history().len(), "turn complete");
        reply
    }

    /// Read-eval-print loop until the exit keyword, Ctrl-C or Ctrl-D
    pub async fn run_interactive(&mut self) -> Result<(), PlannerError> {
        let mut rl = DefaultEditor::new()
            .map_err(|e| PlannerError::general(format!("Failed to initialize readline: {e}")))?;

        println!("Welcome to the Travel Planner AI Agent!");
        println!("Tell me about your travel preferences (budget, duration, interests, etc.)");

        let followup_prompt = format!("You (type '{}' to quit): ", self.exit_keyword);

        loop {
            let prompt = if self.state.history().is_empty() {
                FIRST_PROMPT
            } else {
                followup_prompt.as_str()
            };

            match rl.readline(prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    if self.is_exit(input) {
                        break;
                    }
                    let _ = rl.add_history_entry(input);

                    let reply = self.respond(input).await;
                    println!("Travel Agent: {reply}");
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(PlannerError::general(format!("Readline error: {err}")));
                }
            }
        }

        println!("Thank you for using the Travel Planner AI Agent. Goodbye!");
        Ok(())
    }
}
