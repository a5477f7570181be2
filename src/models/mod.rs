//! Data models for the travel planner
//!
//! This module contains the core domain models organized by concern:
//! - Destination: catalog records and scored rankings
//! - Preferences: typed traveller preferences
//! - Itinerary: the drafted trip plan
//! - Conversation: turns, steps and the session state
//! - Weather: daily forecasts

pub mod conversation;
pub mod destination;
pub mod itinerary;
pub mod preferences;
pub mod weather;

// Re-export all public types for convenient access
pub use conversation::{ConversationState, Degradation, Role, Step, Turn};
pub use destination::{
    BudgetLevel, Destination, DurationRange, ScoredDestination, eq_ignore_case,
};
pub use itinerary::Itinerary;
pub use preferences::{Preferences, RejectedField};
pub use weather::{DailyForecast, WeatherForecast};
