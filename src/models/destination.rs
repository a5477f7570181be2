//! Destination records and their suitability metadata

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Ordinal cost level of a trip or destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Low,
    Medium,
    High,
}

impl BudgetLevel {
    /// Parse a budget word, accepting a few common synonyms
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "low" | "budget" | "cheap" | "economy" => Some(Self::Low),
            "medium" | "moderate" | "mid" | "mid-range" => Some(Self::Medium),
            "high" | "luxury" | "premium" => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive range of trip lengths in days, stored as `[min, max]` in fixtures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct DurationRange {
    pub min: u32,
    pub max: u32,
}

impl DurationRange {
    #[must_use]
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, days: u32) -> bool {
        self.min <= days && days <= self.max
    }
}

impl From<[u32; 2]> for DurationRange {
    fn from([min, max]: [u32; 2]) -> Self {
        Self { min, max }
    }
}

impl From<DurationRange> for [u32; 2] {
    fn from(range: DurationRange) -> Self {
        [range.min, range.max]
    }
}

/// Unicode case-insensitive comparison of trimmed text
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// A static catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub budget_level: BudgetLevel,
    pub ideal_duration: DurationRange,
    #[serde(default)]
    pub best_seasons: Vec<String>,
    /// Any further fixture fields (price hints, descriptions) passed through to prompts
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Destination {
    #[must_use]
    pub fn new(
        name: &str,
        country: &str,
        tags: &[&str],
        budget_level: BudgetLevel,
        ideal_duration: DurationRange,
        best_seasons: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            budget_level,
            ideal_duration,
            best_seasons: best_seasons.iter().map(|s| (*s).to_string()).collect(),
            extra: Map::new(),
        }
    }

    /// Case-insensitive tag lookup
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| eq_ignore_case(t, tag))
    }

    /// Case-insensitive season lookup
    #[must_use]
    pub fn suits_season(&self, season: &str) -> bool {
        self.best_seasons.iter().any(|s| eq_ignore_case(s, season))
    }
}

/// A destination paired with its match score for one ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDestination {
    #[serde(flatten)]
    pub destination: Destination,
    pub match_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("low", Some(BudgetLevel::Low))]
    #[case("Medium", Some(BudgetLevel::Medium))]
    #[case(" HIGH ", Some(BudgetLevel::High))]
    #[case("cheap", Some(BudgetLevel::Low))]
    #[case("luxury", Some(BudgetLevel::High))]
    #[case("whatever", None)]
    fn test_budget_parse(#[case] input: &str, #[case] expected: Option<BudgetLevel>) {
        assert_eq!(BudgetLevel::parse(input), expected);
    }

    #[rstest]
    #[case("Été", "été", true)]
    #[case("ÉCOTOURISME", " écotourisme ", true)]
    #[case("Straße", "STRASSE", false)]
    #[case("beaches", "Beaches", true)]
    fn test_eq_ignore_case(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
        assert_eq!(eq_ignore_case(a, b), expected);
    }

    #[test]
    fn test_duration_range_inclusive() {
        let range = DurationRange::new(5, 14);
        assert!(range.contains(5));
        assert!(range.contains(14));
        assert!(!range.contains(4));
        assert!(!range.contains(15));
    }

    #[test]
    fn test_destination_from_fixture_json() {
        let json = r#"{
            "name": "Bali",
            "country": "Indonesia",
            "tags": ["beaches", "relaxation"],
            "budget_level": "medium",
            "ideal_duration": [5, 14],
            "best_seasons": ["spring", "fall"],
            "budget_inr": "60,000-1,20,000"
        }"#;
        let dest: Destination = serde_json::from_str(json).unwrap();
        assert_eq!(dest.budget_level, BudgetLevel::Medium);
        assert_eq!(dest.ideal_duration, DurationRange::new(5, 14));
        assert!(dest.has_tag("Beaches"));
        assert!(dest.suits_season("FALL"));
        assert_eq!(dest.extra["budget_inr"], "60,000-1,20,000");

        let back = serde_json::to_value(&dest).unwrap();
        assert_eq!(back["ideal_duration"], serde_json::json!([5, 14]));
        assert_eq!(back["budget_inr"], "60,000-1,20,000");
    }

    #[test]
    fn test_scored_destination_serializes_flat() {
        let scored = ScoredDestination {
            destination: Destination::new(
                "Prague",
                "Czech Republic",
                &["culture"],
                BudgetLevel::Medium,
                DurationRange::new(2, 5),
                &["spring"],
            ),
            match_score: 3,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["name"], "Prague");
        assert_eq!(value["match_score"], 3);
    }
}
