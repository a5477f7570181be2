//! Itinerary drafted for the top-ranked destination

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub destination: String,
    pub country: String,
    /// Trip length in days
    pub duration: u32,
    /// Free-text day-by-day plan as written by the model
    pub plan: String,
}

impl Itinerary {
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
